//! Concurrent load against a live listener sharing one logger.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use auth_gate::lifecycle::Shutdown;

mod common;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_logger() {
    let (server, capture) = common::test_server();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr: SocketAddr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let start = Instant::now();

    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            let mut authorized = 0;
            for i in 0..requests_per_task {
                let auth = if (task + i) % 2 == 0 { "Ivan" } else { "Bob" };
                let res = client
                    .get(format!("http://{addr}/test?auth={auth}"))
                    .send()
                    .await
                    .expect("server unreachable");
                if res.status() == 200 {
                    authorized += 1;
                } else {
                    assert_eq!(res.status(), 401);
                }
            }
            authorized
        }));
    }

    let mut authorized = 0;
    for task in tasks {
        authorized += task.await.unwrap();
    }
    let unauthorized = total_requests - authorized;

    let elapsed = start.elapsed();
    println!(
        "{} requests in {:?} ({:.0} req/s)",
        total_requests,
        elapsed,
        total_requests as f64 / elapsed.as_secs_f64()
    );

    drop(client);
    shutdown.trigger();
    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not stop")
        .unwrap()
        .unwrap();

    // Every line arrives whole even with handlers on several worker threads.
    let lines = capture.lines();
    let count = |level: &str, message: &str| {
        lines
            .iter()
            .filter(|l| l.level() == level && l.message() == message)
            .count()
    };
    assert_eq!(count("DEBUG", "Request"), total_requests);
    assert_eq!(count("INFO", "Authorized"), authorized);
    assert_eq!(count("INFO", "OK"), authorized);
    assert_eq!(count("WARN", "Unauthorized"), unauthorized);
}
