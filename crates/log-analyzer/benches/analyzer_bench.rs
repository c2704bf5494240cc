//! 분석기 벤치마크
//!
//! 단일 라인 파싱, 전체 소스 파싱, 집계 처리량을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use logpulse_analyzer::aggregate::{Aggregator, ErrorFilter};
use logpulse_analyzer::parser::{CsvRecordParser, ParserOptions, parse_source};
use logpulse_core::pipeline::RecordParser;

const VALID_LINE: &str = "2024-01-15 12:00:00,192.168.1.100,GET,404";
const INVALID_LINE: &str = "2024-01-15 12:00:00,192.168.1.100,GET,not-a-number";

/// 에러/정상/잘못된 라인이 섞인 소스 생성
fn generate_source(lines: usize) -> String {
    let codes = [200, 200, 301, 404, 403, 500, 503];
    let requests = ["GET", "POST", "PUT", "DELETE"];
    let mut text = String::from("timestamp,ip,request,error_code\n");
    for i in 0..lines {
        if i % 50 == 0 {
            text.push_str(INVALID_LINE);
        } else {
            text.push_str(&format!(
                "2024-01-15 12:{:02}:{:02},10.0.{}.{},{},{}",
                (i / 60) % 60,
                i % 60,
                i % 7,
                i % 13,
                requests[i % requests.len()],
                codes[i % codes.len()]
            ));
        }
        text.push('\n');
    }
    text
}

fn bench_record_parser(c: &mut Criterion) {
    let parser = CsvRecordParser::default();
    let mut group = c.benchmark_group("csv_record_parser");

    group.throughput(Throughput::Elements(1));
    group.bench_function("valid", |b| {
        b.iter(|| parser.parse(black_box(VALID_LINE)).unwrap())
    });
    group.bench_function("invalid_error_code", |b| {
        b.iter(|| parser.parse(black_box(INVALID_LINE)).unwrap_err())
    });

    group.finish();
}

fn bench_parse_source(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_source");
    let options = ParserOptions::default();

    for size in [100, 1_000, 10_000] {
        let text = generate_source(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| parse_source(black_box(text), &options).unwrap())
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    let aggregator = Aggregator::default();
    let filter = ErrorFilter::default();

    for size in [1_000, 10_000] {
        let batch = parse_source(&generate_source(size), &ParserOptions::default()).unwrap();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &batch, |b, batch| {
            b.iter(|| aggregator.aggregate(black_box(batch), &filter))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_record_parser, bench_parse_source, bench_aggregate);
criterion_main!(benches);
