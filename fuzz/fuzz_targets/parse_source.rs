#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use logpulse_analyzer::{Aggregator, ColumnMode, ErrorFilter, ParserOptions, parse_source};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    text: String,
    delimiter: char,
    has_header: bool,
    header_mode: bool,
    include_4xx: bool,
    include_5xx: bool,
}

fuzz_target!(|input: FuzzInput| {
    let options = ParserOptions {
        delimiter: input.delimiter,
        has_header: input.has_header || input.header_mode,
        column_mode: if input.header_mode {
            ColumnMode::Header
        } else {
            ColumnMode::Positional
        },
    };
    let Ok(batch) = parse_source(&input.text, &options) else {
        return;
    };

    // 헤더를 뺀 모든 데이터 줄은 유효 레코드 또는 거부 중 하나로 집계되어야 한다
    let text = input.text.strip_prefix('\u{feff}').unwrap_or(&input.text);
    let line_count = text.lines().count();
    let data_lines = if options.has_header {
        line_count.saturating_sub(1)
    } else {
        line_count
    };
    assert_eq!(batch.records.len() + batch.invalid_lines(), data_lines);

    let filter = ErrorFilter {
        include_4xx: input.include_4xx,
        include_5xx: input.include_5xx,
    };
    let stats = Aggregator::default().aggregate(&batch, &filter);
    assert_eq!(stats.total_requests, batch.records.len());
    assert!(stats.filtered_errors <= stats.total_errors);
});
