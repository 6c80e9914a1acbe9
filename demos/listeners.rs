//! Example demonstrating listeners on a polled file.
//!
//! This example shows how to:
//! - Attach several listeners to one monitor
//! - Receive notifications as the file is created, grown and deleted
//! - Detach a listener by handle
//!
//! Run with: cargo run --example listeners

use pollwatch::prelude::*;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn main() -> Result<()> {
    println!("=== Listener Example ===\n");

    let temp_dir = tempfile::TempDir::new()?;
    let path = temp_dir.path().join("demo.txt");

    let mut monitor = FileMonitor::new(&path);
    println!("Initial state: {}\n", monitor.last_known_state());

    let notifications = Arc::new(AtomicUsize::new(0));
    let notifications_clone = Arc::clone(&notifications);
    let counter = listener_fn(move |state| {
        let count = notifications_clone.fetch_add(1, Ordering::SeqCst) + 1;
        println!("[Listener 1] {} (notification #{})", state, count);
        Ok(())
    });
    let shouter = listener_fn(|state| {
        println!("[Listener 2] FILE IS NOW {}", state.to_string().to_uppercase());
        Ok(())
    });

    monitor.attach(Arc::clone(&counter));
    monitor.attach(Arc::clone(&shouter));
    monitor.attach(Arc::new(ConsoleListener::stdout()));
    println!("Attached 3 listeners\n");

    println!("--- Creating the file ---");
    fs::write(&path, b"hello")?;
    monitor.poll()?;

    println!("--- Polling without changes ---");
    println!("outcome: {:?}\n", monitor.poll()?);

    println!("--- Detaching Listener 2 and growing the file ---");
    monitor.detach(&shouter);
    fs::write(&path, b"hello, world")?;
    monitor.poll()?;

    println!("--- Deleting the file ---");
    fs::remove_file(&path)?;
    monitor.poll()?;

    println!(
        "Polls: {}, changes: {}, Listener 1 saw {} notifications",
        monitor.poll_count(),
        monitor.change_count(),
        notifications.load(Ordering::SeqCst)
    );

    Ok(())
}
