use crate::barrier::RowBarrier;
use crate::queue::TaskQueue;
use crate::raster::RasterImage;
use std::thread;

/// One unit handed to the pool: a row to transform, or the stop marker
/// that retires exactly one worker.
pub enum Message<'a> {
    Row(RowTask<'a>),
    Stop,
}

/// A single row's work: its index, that row's bytes, and the barrier to
/// report into. The slice is one of the disjoint chunks produced by
/// `RasterImage::rows_mut`, so no two live tasks can alias.
pub struct RowTask<'a> {
    pub index: usize,
    pub pixels: &'a mut [u8],
    pub done: &'a RowBarrier,
}

fn worker_loop<F>(queue: &TaskQueue<Message<'_>>, apply: &F)
where
    F: Fn(u8) -> u8,
{
    loop {
        match queue.pop() {
            Message::Row(task) => {
                for value in task.pixels.iter_mut() {
                    *value = apply(*value);
                }
                task.done.mark_done(task.index);
            }
            Message::Stop => break,
        }
    }
}

/// Applies `apply` to every channel byte of every row, spreading the rows
/// over `workers` pooled threads fed through a blocking queue.
///
/// Passing `None` (a failed load) still spins the pool up and straight
/// back down, so workers are always released through the same stop
/// protocol. The scope joins every worker before this returns, which is
/// what lets the row slices borrow from the caller's buffer.
pub fn transform_rows<F>(image: Option<&mut RasterImage>, workers: usize, apply: F)
where
    F: Fn(u8) -> u8 + Sync,
{
    let rows = image.as_deref().map_or(0, RasterImage::rows);
    let barrier = RowBarrier::new(rows);
    let queue = TaskQueue::new();
    thread::scope(|s| {
        for _ in 0..workers {
            s.spawn(|| worker_loop(&queue, &apply));
        }
        if let Some(image) = image {
            for (index, pixels) in image.rows_mut().enumerate() {
                queue.push(Message::Row(RowTask { index, pixels, done: &barrier }));
            }
            barrier.wait_all();
        }
        // Exactly one stop per worker; fewer would leave a thread parked
        // in pop() past the join below.
        for _ in 0..workers {
            queue.push(Message::Stop);
        }
    });
}
