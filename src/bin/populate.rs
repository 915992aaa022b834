// src/bin/populate.rs
// Seeds a running photo-service with fake photos through POST /photos/fake
use dotenv::dotenv;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const DEFAULT_COUNT: usize = 25;
const MAX_COUNT: usize = 1000;

/// Subset of the photo returned by the service
#[derive(Deserialize, Debug)]
struct CreatedPhoto {
    id: String,
    price: f64,
    theme: String,
}

struct PhotoPopulator {
    base_url: String,
    client: Client,
    created: usize,
    failed: usize,
}

impl PhotoPopulator {
    fn new(base_url: String) -> Result<Self, String> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| format!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            base_url,
            client,
            created: 0,
            failed: 0,
        })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn create_fake(&self) -> Result<CreatedPhoto, String> {
        let response = self
            .client
            .post(format!("{}/photos/fake", self.base_url))
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status().is_success() {
            response
                .json::<CreatedPhoto>()
                .await
                .map_err(|e| format!("Failed to parse response JSON: {}", e))
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            Err(format!("HTTP {} - {}", status, body))
        }
    }

    async fn run(&mut self, count: usize) {
        println!("\n{}Checking service status...{}", CYAN, RESET);
        if !self.check_service_health().await {
            println!("{}Service unavailable at {}{}", RED, self.base_url, RESET);
            println!("{}Please ensure photo-service is running (cargo run){}", YELLOW, RESET);
            process::exit(1);
        }
        println!("{}Service available{}\n", GREEN, RESET);

        println!("{}Creating {} fake photos...{}\n", BOLD, count, RESET);
        let started = Instant::now();

        for i in 0..count {
            match self.create_fake().await {
                Ok(photo) => {
                    self.created += 1;
                    println!(
                        "{}[{}/{}] {} {} ({:.2}){}",
                        GREEN, i + 1, count, photo.id, photo.theme, photo.price, RESET
                    );
                }
                Err(err_msg) => {
                    self.failed += 1;
                    println!("{}[{}/{}] failed: {}{}", RED, i + 1, count, err_msg, RESET);
                }
            }
        }

        self.print_summary(started.elapsed());
    }

    fn print_summary(&self, elapsed: Duration) {
        println!("\n{}Summary{}", BOLD, RESET);
        println!("  • Created: {}{}{}", GREEN, self.created, RESET);
        println!("  • Failed:  {}{}{}", RED, self.failed, RESET);
        println!("  • Duration: {:.1}s", elapsed.as_secs_f64());
    }
}

/// Requested number of photos, clamped to 1..=MAX_COUNT
fn parse_count(arg: Option<String>) -> usize {
    arg.and_then(|a| a.parse::<usize>().ok())
        .unwrap_or(DEFAULT_COUNT)
        .clamp(1, MAX_COUNT)
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let base_url =
        env::var("PHOTO_SERVICE_URL").unwrap_or_else(|_| "http://127.0.0.1:8002".to_string());
    let count = parse_count(env::args().nth(1));

    let mut populator = match PhotoPopulator::new(base_url) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{}{}{}", RED, e, RESET);
            process::exit(1);
        }
    };
    populator.run(count).await;

    if populator.failed > 0 {
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(None), DEFAULT_COUNT);
        assert_eq!(parse_count(Some("10".to_string())), 10);
        assert_eq!(parse_count(Some("0".to_string())), 1);
        assert_eq!(parse_count(Some("5000".to_string())), MAX_COUNT);
        assert_eq!(parse_count(Some("lots".to_string())), DEFAULT_COUNT);
    }
}
