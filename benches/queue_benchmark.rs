//! Key path benchmark: Measure queue operations and record polling.
//!
//! Target: < 1µs for a full poll of a busy frame's input

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use doombridge::{InputPoller, KeyEvent, KeyQueue};
use std::io::Cursor;

fn queue_push_pop(c: &mut Criterion) {
    c.bench_function("queue_push_pop_16", |b| {
        let mut queue = KeyQueue::new();
        b.iter(|| {
            for code in 0..16u8 {
                queue.push(black_box(KeyEvent::down(code)));
            }
            while let Some(event) = queue.pop() {
                black_box(event);
            }
        })
    });
}

fn queue_overwrite(c: &mut Criterion) {
    c.bench_function("queue_push_overwrite_64", |b| {
        let mut queue = KeyQueue::new();
        b.iter(|| {
            for code in 0..64u8 {
                queue.push(black_box(KeyEvent::up(code)));
            }
            queue.clear();
        })
    });
}

fn poll_records(c: &mut Criterion) {
    let mut bytes = Vec::new();
    for code in 0..10u8 {
        bytes.extend_from_slice(&KeyEvent::down(code).to_record());
        bytes.extend_from_slice(&KeyEvent::up(code).to_record());
    }

    c.bench_function("poll_20_records", |b| {
        b.iter(|| {
            let mut queue = KeyQueue::new();
            let mut poller = InputPoller::new(Cursor::new(black_box(bytes.as_slice())));
            poller.poll(&mut queue)
        })
    });
}

criterion_group!(benches, queue_push_pop, queue_overwrite, poll_records);
criterion_main!(benches);
