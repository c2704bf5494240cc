//! 집계기: 검증된 레코드로부터 요약 통계를 계산
//!
//! [`Aggregator`]는 [`ParsedBatch`] 전체를 한 번에 받아 [`AggregateStats`]를
//! 만듭니다. 결과는 입력에만 의존하므로 같은 입력은 항상 같은 통계를 냅니다.
//!
//! 빈도 테이블은 개수 내림차순이며, 개수가 같으면 입력에서 먼저 나타난 키가
//! 앞에 옵니다.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Serialize;

use logpulse_core::types::{ErrorClass, LogRecord};

use crate::parser::ParsedBatch;

/// 빈도 테이블 한 항목
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry<K> {
    /// 키
    pub key: K,
    /// 출현 횟수
    pub count: usize,
}

/// 정렬된 빈도 테이블
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable<K> {
    entries: Vec<FrequencyEntry<K>>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> FrequencyTable<K> {
    /// 키 시퀀스로부터 빈도 테이블을 만듭니다.
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut index: HashMap<K, usize> = HashMap::new();
        let mut entries: Vec<FrequencyEntry<K>> = Vec::new();

        for key in keys {
            match index.get(&key) {
                Some(&slot) => entries[slot].count += 1,
                None => {
                    index.insert(key.clone(), entries.len());
                    entries.push(FrequencyEntry { key, count: 1 });
                }
            }
        }

        // 안정 정렬: 동률은 첫 출현 순서 유지
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        Self { entries }
    }

    /// 키의 출현 횟수를 반환합니다.
    pub fn get(&self, key: &K) -> Option<usize> {
        self.entries
            .iter()
            .find(|entry| &entry.key == key)
            .map(|entry| entry.count)
    }
}

impl<K> FrequencyTable<K> {
    /// 상위 `limit`개만 남깁니다.
    pub fn truncate(&mut self, limit: usize) {
        self.entries.truncate(limit);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrequencyEntry<K>> {
        self.entries.iter()
    }

    /// 전체 출현 횟수 합계
    pub fn total(&self) -> usize {
        self.entries.iter().map(|entry| entry.count).sum()
    }
}

impl<'a, K> IntoIterator for &'a FrequencyTable<K> {
    type Item = &'a FrequencyEntry<K>;
    type IntoIter = std::slice::Iter<'a, FrequencyEntry<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// 에러 필터
///
/// 4xx와 5xx를 독립적으로 포함/제외합니다. 600 이상 코드는 어느 토글로도
/// 제외되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ErrorFilter {
    /// 4xx 포함 여부
    pub include_4xx: bool,
    /// 5xx 포함 여부
    pub include_5xx: bool,
}

impl Default for ErrorFilter {
    fn default() -> Self {
        Self {
            include_4xx: true,
            include_5xx: true,
        }
    }
}

impl ErrorFilter {
    /// 에러 코드가 필터를 통과하는지 확인합니다.
    ///
    /// 400 미만 코드는 에러가 아니므로 항상 `false`입니다.
    pub fn admits(&self, code: i64) -> bool {
        match ErrorClass::of(code) {
            ErrorClass::NotError => false,
            ErrorClass::ClientError => self.include_4xx,
            ErrorClass::ServerError => self.include_5xx,
            ErrorClass::Other => true,
        }
    }

    pub fn toggle_4xx(&mut self) {
        self.include_4xx = !self.include_4xx;
    }

    pub fn toggle_5xx(&mut self) {
        self.include_5xx = !self.include_5xx;
    }
}

/// 집계 옵션
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateOptions {
    /// 에러 IP 순위 최대 개수
    pub top_ip_limit: usize,
    /// 최근 에러 이벤트 최대 개수
    pub recent_limit: usize,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_ip_limit: 5,
            recent_limit: 10,
        }
    }
}

/// 집계 결과
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateStats {
    /// 유효 레코드 수
    pub total_requests: usize,
    /// 전체 에러(`>= 400`) 수 (필터 미적용)
    pub total_errors: usize,
    /// 필터를 통과한 에러 수
    pub filtered_errors: usize,
    /// 잘못된 라인 수
    pub invalid_lines: usize,
    /// 에러 코드별 빈도 (필터 적용)
    pub error_counts: FrequencyTable<i64>,
    /// 에러를 많이 낸 IP 순위 (필터 적용, 상한 있음)
    pub top_ips: FrequencyTable<String>,
    /// 요청 유형별 빈도 (전체 레코드)
    pub request_counts: FrequencyTable<String>,
    /// 최근 에러 이벤트 (타임스탬프 내림차순)
    pub recent_errors: Vec<LogRecord>,
    /// 적용된 필터
    pub filter: ErrorFilter,
}

/// 집계기
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    options: AggregateOptions,
}

impl Aggregator {
    pub fn new(options: AggregateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> AggregateOptions {
        self.options
    }

    /// 배치 전체를 집계합니다.
    pub fn aggregate(&self, batch: &ParsedBatch, filter: &ErrorFilter) -> AggregateStats {
        let records = &batch.records;

        let total_errors = records.iter().filter(|r| r.is_error()).count();
        let filtered: Vec<&LogRecord> = records
            .iter()
            .filter(|r| filter.admits(r.error_code))
            .collect();

        let error_counts = FrequencyTable::from_keys(filtered.iter().map(|r| r.error_code));
        let mut top_ips = FrequencyTable::from_keys(filtered.iter().map(|r| r.ip.clone()));
        top_ips.truncate(self.options.top_ip_limit);
        let request_counts = FrequencyTable::from_keys(records.iter().map(|r| r.request.clone()));

        let mut recent: Vec<&LogRecord> = filtered.clone();
        recent.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let recent_errors = recent
            .into_iter()
            .take(self.options.recent_limit)
            .cloned()
            .collect();

        AggregateStats {
            total_requests: records.len(),
            total_errors,
            filtered_errors: filtered.len(),
            invalid_lines: batch.invalid_lines(),
            error_counts,
            top_ips,
            request_counts,
            recent_errors,
            filter: *filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record(ts: &str, ip: &str, request: &str, code: i64) -> LogRecord {
        LogRecord {
            timestamp: ts.to_owned(),
            ip: ip.to_owned(),
            request: request.to_owned(),
            error_code: code,
        }
    }

    fn batch(records: Vec<LogRecord>) -> ParsedBatch {
        ParsedBatch {
            records,
            rejections: Vec::new(),
        }
    }

    #[test]
    fn frequency_table_orders_by_count_then_first_occurrence() {
        let table = FrequencyTable::from_keys(["b", "a", "a", "c", "b", "d"]);
        let keys: Vec<&str> = table.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["b", "a", "c", "d"]);
        assert_eq!(table.get(&"a"), Some(2));
        assert_eq!(table.get(&"z"), None);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn frequency_table_truncate_never_pads() {
        let mut table = FrequencyTable::from_keys(["x", "y"]);
        table.truncate(5);
        assert_eq!(table.len(), 2);
        table.truncate(1);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn filter_admits_by_class() {
        let filter = ErrorFilter {
            include_4xx: false,
            include_5xx: true,
        };
        assert!(!filter.admits(200));
        assert!(!filter.admits(404));
        assert!(filter.admits(503));
        assert!(filter.admits(700));

        let none = ErrorFilter {
            include_4xx: false,
            include_5xx: false,
        };
        assert!(none.admits(600));
    }

    #[test]
    fn filter_toggles_are_independent() {
        let mut filter = ErrorFilter::default();
        filter.toggle_4xx();
        assert!(!filter.include_4xx);
        assert!(filter.include_5xx);
        filter.toggle_5xx();
        filter.toggle_4xx();
        assert!(filter.include_4xx);
        assert!(!filter.include_5xx);
    }

    #[test]
    fn aggregates_counts() {
        let records = vec![
            record("t1", "1.1.1.1", "GET", 404),
            record("t2", "2.2.2.2", "GET", 200),
            record("t3", "1.1.1.1", "POST", 500),
        ];
        let stats = Aggregator::default().aggregate(&batch(records), &ErrorFilter::default());

        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.total_errors, 2);
        assert_eq!(stats.filtered_errors, 2);
        assert_eq!(stats.error_counts.get(&404), Some(1));
        assert_eq!(stats.error_counts.get(&200), None);
        assert_eq!(stats.top_ips.get(&"1.1.1.1".to_owned()), Some(2));
        assert_eq!(stats.request_counts.get(&"GET".to_owned()), Some(2));
    }

    #[test]
    fn filter_keeps_total_errors_unfiltered() {
        let records = vec![
            record("t1", "1.1.1.1", "GET", 404),
            record("t2", "1.1.1.1", "POST", 500),
        ];
        let filter = ErrorFilter {
            include_4xx: false,
            include_5xx: true,
        };
        let stats = Aggregator::default().aggregate(&batch(records), &filter);

        assert_eq!(stats.total_errors, 2);
        assert_eq!(stats.filtered_errors, 1);
        assert_eq!(stats.error_counts.len(), 1);
        assert_eq!(stats.error_counts.get(&500), Some(1));
        assert_eq!(stats.filter, filter);
    }

    #[test]
    fn top_ips_are_truncated() {
        let records: Vec<LogRecord> = (0..8)
            .map(|i| record("t", &format!("10.0.0.{i}"), "GET", 500))
            .collect();
        let stats = Aggregator::default().aggregate(&batch(records), &ErrorFilter::default());
        assert_eq!(stats.top_ips.len(), 5);
        assert_eq!(stats.top_ips.iter().next().unwrap().key, "10.0.0.0");
    }

    #[test]
    fn recent_errors_are_latest_first() {
        let records = vec![
            record("2024-01-01 10:00:00", "a", "GET", 404),
            record("2024-01-01 12:00:00", "b", "GET", 200),
            record("2024-01-01 11:00:00", "c", "GET", 500),
            record("2024-01-01 09:00:00", "d", "GET", 503),
        ];
        let aggregator = Aggregator::new(AggregateOptions {
            top_ip_limit: 5,
            recent_limit: 2,
        });
        let stats = aggregator.aggregate(&batch(records), &ErrorFilter::default());
        let ips: Vec<&str> = stats.recent_errors.iter().map(|r| r.ip.as_str()).collect();
        assert_eq!(ips, vec!["c", "a"]);
    }

    #[test]
    fn empty_batch_is_all_zero() {
        let stats = Aggregator::default().aggregate(&ParsedBatch::default(), &ErrorFilter::default());
        assert_eq!(stats.total_requests, 0);
        assert_eq!(stats.total_errors, 0);
        assert!(stats.error_counts.is_empty());
        assert!(stats.top_ips.is_empty());
        assert!(stats.recent_errors.is_empty());
    }

    #[test]
    fn frequency_table_serializes_as_list() {
        let table = FrequencyTable::from_keys([404_i64, 404, 500]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"key":404,"count":2},{"key":500,"count":1}]"#);
    }

    fn arb_record() -> impl Strategy<Value = LogRecord> {
        (
            "[0-9]{2}",
            prop::sample::select(vec!["1.1.1.1", "2.2.2.2", "3.3.3.3", "4.4.4.4"]),
            prop::sample::select(vec!["GET", "POST", "PUT"]),
            prop::sample::select(vec![200_i64, 301, 404, 403, 500, 503, 700]),
        )
            .prop_map(|(ts, ip, request, code)| record(&ts, ip, request, code))
    }

    proptest! {
        #[test]
        fn error_tables_only_hold_errors(records in prop::collection::vec(arb_record(), 0..64)) {
            let expected = records.iter().filter(|r| r.error_code >= 400).count();
            let stats = Aggregator::default().aggregate(&batch(records), &ErrorFilter::default());

            prop_assert_eq!(stats.total_errors, expected);
            prop_assert_eq!(stats.error_counts.total(), expected);
            prop_assert!(stats.error_counts.iter().all(|e| e.key >= 400));
            prop_assert!(stats.top_ips.len() <= 5);
        }

        #[test]
        fn tables_are_sorted_descending(records in prop::collection::vec(arb_record(), 0..64)) {
            let stats = Aggregator::default().aggregate(&batch(records), &ErrorFilter::default());
            let counts: Vec<usize> = stats.top_ips.iter().map(|e| e.count).collect();
            prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]));
            let counts: Vec<usize> = stats.request_counts.iter().map(|e| e.count).collect();
            prop_assert!(counts.windows(2).all(|w| w[0] >= w[1]));
        }

        #[test]
        fn filtered_errors_never_exceed_total(
            records in prop::collection::vec(arb_record(), 0..64),
            include_4xx in any::<bool>(),
            include_5xx in any::<bool>(),
        ) {
            let filter = ErrorFilter { include_4xx, include_5xx };
            let stats = Aggregator::default().aggregate(&batch(records), &filter);
            prop_assert!(stats.filtered_errors <= stats.total_errors);
            prop_assert_eq!(stats.error_counts.total(), stats.filtered_errors);
        }
    }
}
