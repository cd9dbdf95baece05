use std::fmt::Display;
use std::iter::FusedIterator;
use std::time::{Duration, Instant};
use tracing::debug;

pub fn timed<F, R>(f: F) -> (Duration, R)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let out = f();
    (start.elapsed(), out)
}

pub fn log_timed<S, F, R>(label: S, f: F) -> R
where
    S: Display,
    F: FnOnce() -> R,
{
    let (dur, out) = timed(f);
    debug!("{} took {:?}", label, dur);
    out
}

/// Hands `consumer` an iterator over the `Ok` values of `source`. The iterator ends at the first
/// `Err`, which is then returned instead of the consumer's result.
pub fn try_use_iter<I, T, E, F, R>(source: I, consumer: F) -> Result<R, E>
where
    I: Iterator<Item = Result<T, E>>,
    F: FnOnce(&mut TryUseValueIter<I, E>) -> R,
{
    let mut out = TryUseValueIter { source, err: None };
    let result = consumer(&mut out);
    if let Some(err) = out.err.take() {
        Err(err)
    } else {
        Ok(result)
    }
}

pub struct TryUseValueIter<I, E> {
    source: I,
    err: Option<E>,
}

impl<I, T, E> Iterator for TryUseValueIter<I, E>
where
    I: Iterator<Item = Result<T, E>>,
{
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.err.is_some() {
            None
        } else {
            match self.source.next() {
                None => None,
                Some(Err(err)) => {
                    self.err = Some(err);
                    None
                }
                Some(Ok(v)) => Some(v),
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, max) = self.source.size_hint();
        (0, max)
    }
}

impl<I, T, E> FusedIterator for TryUseValueIter<I, E> where I: FusedIterator<Item = Result<T, E>> {}

#[cfg(test)]
pub mod tests {
    use crate::util::{log_timed, timed, try_use_iter};

    #[test]
    fn test_try_use_iter_ok() {
        let source = vec![Ok::<i32, String>(1), Ok(2), Ok(3)].into_iter();
        let sum = try_use_iter(source, |values| values.sum::<i32>());
        assert_eq!(sum, Ok(6));
    }

    #[test]
    fn test_try_use_iter_stops_at_first_err() {
        let source = vec![Ok(1), Err("bad".to_string()), Ok(3), Err("worse".to_string())];
        let mut seen = Vec::new();
        let out = try_use_iter(source.into_iter(), |values| {
            for v in values {
                seen.push(v);
            }
        });
        assert_eq!(out, Err("bad".to_string()));
        assert_eq!(seen, vec![1]);
    }

    #[test]
    fn test_timed() {
        let (_, out) = timed(|| 40 + 2);
        assert_eq!(out, 42);
        assert_eq!(log_timed("answer", || "done"), "done");
    }
}
