//! Balance ledger calculator
//!
//! Turns the favor history between two members into one signed number of
//! minutes. See [`PairBalance`] for the sign convention.

use tracing::{debug, warn};

use super::balance::PairBalance;
use super::record::TransactionRecord;
use super::source::{FetchError, TransactionSource};
use crate::models::MemberId;

/// Net minutes between `a` and `b` over `records`
///
/// A gave to B: subtract. B gave to A: add. Records not between the pair are
/// skipped. The result does not depend on record order.
pub fn pair_balance<'r, I>(records: I, a: &MemberId, b: &MemberId) -> i64
where
    I: IntoIterator<Item = &'r TransactionRecord>,
{
    let mut balance: i64 = 0;

    for record in records {
        if record.from_member == *a && record.to_member == *b {
            balance -= record.minutes;
        } else if record.from_member == *b && record.to_member == *a {
            balance += record.minutes;
        }
    }

    balance
}

/// Fetch the pair's records from `source` and compute their balance
///
/// A fetch failure is returned as-is; nothing is summed in that case.
pub fn compute_pair_balance<S>(
    source: &S,
    a: &MemberId,
    b: &MemberId,
) -> Result<PairBalance, FetchError>
where
    S: TransactionSource + ?Sized,
{
    let records = source.fetch_transactions(a, b).map_err(|e| {
        warn!(member_a = %a, member_b = %b, error = %e, "transaction fetch failed");
        e
    })?;

    let minutes = pair_balance(&records, a, b);
    debug!(
        member_a = %a,
        member_b = %b,
        records = records.len(),
        minutes,
        "computed pair balance"
    );

    Ok(PairBalance::new(a.clone(), b.clone(), minutes))
}

/// Calculator bound to one transaction source
///
/// Holds no state besides the source; every call fetches afresh.
pub struct BalanceCalculator<S> {
    source: S,
}

impl<S: TransactionSource> BalanceCalculator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn balance(&self, a: &MemberId, b: &MemberId) -> Result<PairBalance, FetchError> {
        compute_pair_balance(&self.source, a, b)
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::source::StaticSource;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn ids() -> (MemberId, MemberId) {
        ("u1".into(), "u2".into())
    }

    struct FailingSource;

    impl TransactionSource for FailingSource {
        fn fetch_transactions(
            &self,
            _a: &MemberId,
            _b: &MemberId,
        ) -> Result<Vec<TransactionRecord>, FetchError> {
            Err(FetchError::Unavailable("backend timed out".into()))
        }
    }

    struct CountingSource {
        calls: AtomicUsize,
        inner: StaticSource,
    }

    impl TransactionSource for CountingSource {
        fn fetch_transactions(
            &self,
            a: &MemberId,
            b: &MemberId,
        ) -> Result<Vec<TransactionRecord>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch_transactions(a, b)
        }
    }

    #[test]
    fn test_empty_input_is_zero() {
        let (a, b) = ids();
        assert_eq!(pair_balance(&Vec::<TransactionRecord>::new(), &a, &b), 0);

        let result = compute_pair_balance(&StaticSource::default(), &a, &b).unwrap();
        assert_eq!(result.minutes, 0);
        assert!(result.is_settled());
    }

    #[test]
    fn test_single_transfer_each_direction() {
        let (a, b) = ids();
        assert_eq!(pair_balance(&[TransactionRecord::new("u1", "u2", 45)], &a, &b), -45);
        assert_eq!(pair_balance(&[TransactionRecord::new("u2", "u1", 45)], &a, &b), 45);
    }

    #[test]
    fn test_worked_example() {
        let (a, b) = ids();
        let records = vec![
            TransactionRecord::new("u1", "u2", 30),
            TransactionRecord::new("u2", "u1", 10),
        ];
        assert_eq!(pair_balance(&records, &a, &b), -20);

        let result = compute_pair_balance(&StaticSource::new(records), &a, &b).unwrap();
        assert_eq!(result.minutes, -20);
        assert_eq!(result.debtor(), Some(&b));
    }

    #[test]
    fn test_inverse_transfers_cancel() {
        let (a, b) = ids();
        let records = vec![
            TransactionRecord::new("u1", "u2", 60),
            TransactionRecord::new("u2", "u1", 60),
        ];
        assert_eq!(pair_balance(&records, &a, &b), 0);
    }

    #[test]
    fn test_swapping_the_pair_negates() {
        let (a, b) = ids();
        let records = vec![
            TransactionRecord::new("u1", "u2", 30),
            TransactionRecord::new("u2", "u1", 75),
        ];
        assert_eq!(pair_balance(&records, &a, &b), -pair_balance(&records, &b, &a));
    }

    #[test]
    fn test_unrelated_records_ignored() {
        let (a, b) = ids();
        let records = vec![
            TransactionRecord::new("u1", "u2", 30),
            TransactionRecord::new("u1", "u3", 500),
            TransactionRecord::new("u3", "u2", 500),
            TransactionRecord::new("u3", "u4", 500),
        ];
        assert_eq!(pair_balance(&records, &a, &b), -30);
    }

    #[test]
    fn test_permissive_with_odd_records() {
        let (a, b) = ids();
        let records = vec![
            TransactionRecord::new("u1", "u1", 100),
            TransactionRecord::new("u2", "u1", -15),
        ];
        assert_eq!(pair_balance(&records, &a, &b), -15);
    }

    #[test]
    fn test_large_histories_do_not_wrap_at_32_bits() {
        let (a, b) = ids();
        let records: Vec<_> = (0..3)
            .map(|_| TransactionRecord::new("u2", "u1", i64::from(i32::MAX)))
            .collect();
        assert_eq!(pair_balance(&records, &a, &b), 3 * i64::from(i32::MAX));
    }

    #[test]
    fn test_fetch_failure_is_not_a_number() {
        let (a, b) = ids();
        let result = compute_pair_balance(&FailingSource, &a, &b);
        assert_eq!(
            result,
            Err(FetchError::Unavailable("backend timed out".into()))
        );
    }

    #[test]
    fn test_calculator_fetches_on_every_call() {
        let (a, b) = ids();
        let calculator = BalanceCalculator::new(CountingSource {
            calls: AtomicUsize::new(0),
            inner: StaticSource::new(vec![TransactionRecord::new("u2", "u1", 5)]),
        });

        assert_eq!(calculator.balance(&a, &b).unwrap().minutes, 5);
        assert_eq!(calculator.balance(&a, &b).unwrap().minutes, 5);
        assert_eq!(calculator.source().calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_parallel_invocations_agree() {
        let (a, b) = ids();
        let source = StaticSource::new(vec![
            TransactionRecord::new("u1", "u2", 30),
            TransactionRecord::new("u2", "u1", 10),
        ]);

        let results: Vec<i64> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| compute_pair_balance(&source, &a, &b).map(|r| r.minutes)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap().unwrap())
                .collect()
        });

        assert!(results.iter().all(|&m| m == -20));
    }

    fn record_strategy() -> impl Strategy<Value = TransactionRecord> {
        (0usize..4, 0usize..4, 0i64..=10_000).prop_map(|(from, to, minutes)| {
            let names = ["u1", "u2", "u3", "u4"];
            TransactionRecord::new(names[from], names[to], minutes)
        })
    }

    proptest! {
        #[test]
        fn balance_is_order_independent(
            records in prop::collection::vec(record_strategy(), 0..40),
            seed in any::<u64>(),
        ) {
            let (a, b) = ids();
            let expected = pair_balance(&records, &a, &b);

            let mut reversed = records.clone();
            reversed.reverse();
            prop_assert_eq!(pair_balance(&reversed, &a, &b), expected);

            let mut rotated = records.clone();
            if !rotated.is_empty() {
                let k = (seed as usize) % rotated.len();
                rotated.rotate_left(k);
            }
            prop_assert_eq!(pair_balance(&rotated, &a, &b), expected);

            let mut sorted = records;
            sorted.sort_by_key(|r| (r.minutes, r.from_member.clone(), r.to_member.clone()));
            prop_assert_eq!(pair_balance(&sorted, &a, &b), expected);
        }

        #[test]
        fn third_party_records_do_not_move_the_balance(
            records in prop::collection::vec(record_strategy(), 0..30),
            noise in prop::collection::vec((0i64..=10_000, any::<bool>()), 0..10),
        ) {
            let (a, b) = ids();
            let expected = pair_balance(&records, &a, &b);

            let mut noisy = records;
            for (minutes, outgoing) in noise {
                if outgoing {
                    noisy.push(TransactionRecord::new("u1", "outsider", minutes));
                } else {
                    noisy.push(TransactionRecord::new("outsider", "u2", minutes));
                }
            }
            prop_assert_eq!(pair_balance(&noisy, &a, &b), expected);
        }

        #[test]
        fn matching_transfers_net_to_zero(minutes in 0i64..=1_000_000) {
            let (a, b) = ids();
            let records = vec![
                TransactionRecord::new("u1", "u2", minutes),
                TransactionRecord::new("u2", "u1", minutes),
            ];
            prop_assert_eq!(pair_balance(&records, &a, &b), 0);
        }
    }
}
