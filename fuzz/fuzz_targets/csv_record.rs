#![no_main]

use libfuzzer_sys::fuzz_target;
use logpulse_analyzer::CsvRecordParser;
use logpulse_core::pipeline::RecordParser;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    let parser = CsvRecordParser::default();

    // 크래시나 패닉 없이 Ok 또는 Err을 반환해야 한다
    if let Ok(record) = parser.parse(line) {
        assert_eq!(line.trim().split(',').count(), 4);
        assert_eq!(record.error_code.to_string().parse::<i64>().ok(), Some(record.error_code));
    }
});
