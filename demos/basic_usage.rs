use shared_queue::{BlockingQueue, QueueFactory, QueueKind};
use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() {
    // Pick the variant from the first argument: "standard" (default) or "pimpl"
    let kind = match env::args().nth(1).map(|arg| arg.parse::<QueueKind>()) {
        None => QueueKind::default(),
        Some(Ok(kind)) => kind,
        Some(Err(err)) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };

    println!("SharedQueue Rust Example ({})", kind);
    println!("------------------------\n");

    // Configuration
    const PRODUCERS: usize = 1; // Number of producer threads
    const CONSUMERS: usize = 2; // Number of consumer threads
    const N: u32 = 1_000_000; // Each producer pushes this many elements into the queue
    const CAPACITY: usize = 1024; // Queue capacity

    // Create a queue object shared between all producers and consumers
    let queue: Arc<dyn BlockingQueue<u32>> = match QueueFactory::create::<u32>(kind, CAPACITY) {
        Ok(queue) => Arc::from(queue),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    println!("Starting {} producers and {} consumers", PRODUCERS, CONSUMERS);
    println!("Each producer will push {} elements", N);
    println!("Queue capacity: {}\n", CAPACITY);

    let start_time = Instant::now();

    // Start the consumers; each stops when it dequeues a 0
    let mut consumer_threads = Vec::with_capacity(CONSUMERS);
    for _ in 0..CONSUMERS {
        let q = queue.clone();
        consumer_threads.push(thread::spawn(move || {
            let mut local_sum = 0u64;
            loop {
                let n = q.dequeue();
                if n == 0 {
                    break;
                }
                local_sum += n as u64;
            }
            local_sum
        }));
    }

    // Start the producers
    let mut producer_threads = Vec::with_capacity(PRODUCERS);
    for _ in 0..PRODUCERS {
        let q = queue.clone();
        producer_threads.push(thread::spawn(move || {
            // Push elements in descending order [N, 1]
            for n in (1..=N).rev() {
                q.enqueue(n);
            }
        }));
    }

    for handle in producer_threads {
        handle.join().unwrap();
    }

    // Tell consumers to terminate by pushing one 0 for each consumer
    for _ in 0..CONSUMERS {
        queue.enqueue(0);
    }

    let sums: Vec<u64> = consumer_threads
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    let total_sum: u64 = sums.iter().sum();

    // The expected sum is N*(N+1)/2 * PRODUCERS
    let expected_sum: u64 = (N as u64 * (N as u64 + 1) / 2) * PRODUCERS as u64;

    println!("Execution time: {:?}", start_time.elapsed());
    println!("Total sum: {}", total_sum);
    println!("Expected sum: {}", expected_sum);

    if total_sum != expected_sum {
        println!("ERROR: Sum mismatch! Difference: {}", total_sum as i64 - expected_sum as i64);
    } else {
        println!("SUCCESS: All elements were correctly processed.");
    }

    println!("\nPer-consumer statistics:");
    for (i, &sum) in sums.iter().enumerate() {
        println!("Consumer {}: sum = {}", i, sum);
        if sum == 0 {
            println!("WARNING: Consumer {} received no elements!", i);
        }
    }

    // A timed dequeue on the drained queue gives up instead of blocking
    let waited = Instant::now();
    let leftover = queue.dequeue_timeout(Duration::from_millis(100));
    println!("\nTimed dequeue on empty queue: {:?} after {:?}", leftover, waited.elapsed());
}
