//! Splitting a frame's rows across worker threads.
//!
//! Rows are dealt out by stride: with `T` lanes, lane `t` gets rows
//! `t, t+T, t+2T, ...`. Each lane receives its rows as [`ScanlineMut`]
//! views, which the borrow checker guarantees are disjoint, so workers write
//! into the shared image without any locking. Interleaving rows keeps lanes
//! balanced when the scene is concentrated in one band of the image.
//!
//! A frame is a fork-join: [`Scheduler::run`] returns only after every lane
//! has finished. Since a row's pixels depend only on that row's inputs, the
//! lane count never changes the result.

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::Result;
use crate::render::framebuffer::{Image, ScanlineMut};

/// Deals the rows of `image` into `lanes` stride-interleaved groups.
///
/// `lanes` of zero is treated as one.
pub fn partition_rows(image: &mut Image, lanes: usize) -> Vec<Vec<ScanlineMut<'_>>> {
    let lanes = lanes.max(1);
    let mut out: Vec<Vec<ScanlineMut<'_>>> = (0..lanes).map(|_| Vec::new()).collect();
    for row in image.rows_mut() {
        out[row.index() % lanes].push(row);
    }
    out
}

/// Runs per-lane work on a fixed set of threads.
pub struct Scheduler {
    lanes: usize,
    pool: Option<ThreadPool>,
}

impl Scheduler {
    /// With one worker no pool is started and lanes run on the caller's thread.
    pub fn new(workers: usize) -> Result<Self> {
        let lanes = workers.max(1);
        let pool = if lanes > 1 {
            Some(
                ThreadPoolBuilder::new()
                    .num_threads(lanes)
                    .thread_name(|i| format!("cellraster-row-{i}"))
                    .build()?,
            )
        } else {
            None
        };
        Ok(Self { lanes, pool })
    }

    pub fn lanes(&self) -> usize {
        self.lanes
    }

    /// Calls `work` once per lane with that lane's rows and waits for all lanes.
    pub fn run<F>(&self, image: &mut Image, work: F)
    where
        F: Fn(&mut [ScanlineMut<'_>]) + Sync,
    {
        let Some(pool) = &self.pool else {
            let mut rows: Vec<_> = image.rows_mut().collect();
            work(rows.as_mut_slice());
            return;
        };

        let lanes = partition_rows(image, self.lanes);
        let work = &work;
        pool.scope(|s| {
            for mut lane in lanes {
                s.spawn(move |_| work(lane.as_mut_slice()));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Cell, Color};

    #[test]
    fn rows_are_dealt_by_stride() {
        let mut image = Image::new(7, 2);
        let lanes = partition_rows(&mut image, 3);
        let indices: Vec<Vec<usize>> = lanes
            .iter()
            .map(|lane| lane.iter().map(ScanlineMut::index).collect())
            .collect();
        assert_eq!(indices, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn more_lanes_than_rows_leaves_some_empty() {
        let mut image = Image::new(2, 2);
        let lanes = partition_rows(&mut image, 4);
        assert_eq!(lanes.len(), 4);
        assert_eq!(lanes.iter().map(Vec::len).sum::<usize>(), 2);
    }

    #[test]
    fn every_row_is_visited_once() {
        for workers in [1, 2, 5] {
            let scheduler = Scheduler::new(workers).unwrap();
            assert_eq!(scheduler.lanes(), workers);

            let mut image = Image::new(11, 3);
            scheduler.run(&mut image, |rows| {
                for row in rows.iter_mut() {
                    let glyph = char::from(b'a' + row.index() as u8);
                    row.set(0, Cell::glyph(glyph, Color::White));
                }
            });

            for r in 0..11 {
                let glyph = char::from(b'a' + r as u8);
                assert_eq!(image.get(r, 0), Some(Cell::glyph(glyph, Color::White)));
                assert_eq!(image.get(r, 1), None);
            }
        }
    }

    #[test]
    fn zero_workers_runs_inline() {
        let scheduler = Scheduler::new(0).unwrap();
        assert_eq!(scheduler.lanes(), 1);
    }
}
