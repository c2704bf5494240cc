#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use logpulse_analyzer::HeaderRecordParser;
use logpulse_core::pipeline::RecordParser;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    header: String,
    delimiter: char,
    lines: Vec<String>,
}

fuzz_target!(|input: FuzzInput| {
    let Ok(parser) = HeaderRecordParser::from_header(&input.header, input.delimiter) else {
        return;
    };
    for line in input.lines.iter().take(64) {
        let _ = parser.parse(line);
    }
});
