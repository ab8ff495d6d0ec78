use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shared_queue::{BlockingQueue, QueueFactory, QueueKind};
use std::sync::Arc;
use std::thread;

// Queue capacity for benchmarks
const CAPACITY: usize = 1024;
// Number of ping-pong operations per benchmark
const PING_PONGS: usize = 10_000;

fn ping_pong(kind: QueueKind) {
    let q1: Arc<dyn BlockingQueue<u32>> = Arc::from(QueueFactory::create::<u32>(kind, CAPACITY).unwrap());
    let q2: Arc<dyn BlockingQueue<u32>> = Arc::from(QueueFactory::create::<u32>(kind, CAPACITY).unwrap());

    // Ping thread
    let q1_ping = q1.clone();
    let q2_ping = q2.clone();
    let ping_thread = thread::spawn(move || {
        for i in 0..PING_PONGS {
            q1_ping.enqueue(black_box(i as u32));
            black_box(q2_ping.dequeue());
        }
    });

    // Pong thread
    let pong_thread = thread::spawn(move || {
        for _ in 0..PING_PONGS {
            let val = q1.dequeue();
            q2.enqueue(black_box(val));
        }
    });

    ping_thread.join().unwrap();
    pong_thread.join().unwrap();
}

fn bench_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("latency");
    group.sample_size(20);

    for kind in [QueueKind::Standard, QueueKind::PImpl] {
        group.bench_function(BenchmarkId::new(kind.to_string(), "ping-pong"), |b| {
            b.iter(|| ping_pong(kind))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_latency);
criterion_main!(benches);
