//! Helper to compute the HMAC-SHA256 webhook signature for a payload.
//!
//! Usage: sign_payload <secret> <json-body>

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: sign_payload <secret> <json-body>");
        eprintln!();
        eprintln!("Example:");
        eprintln!(
            "  sign_payload \"testsecret\" '{{\"message_id\":\"m1\",\"from\":\"+919876543210\",\"to\":\"+14155550100\",\"ts\":\"2025-01-15T10:00:00Z\",\"text\":\"Hello\"}}'"
        );
        process::exit(1);
    }

    let signature = webhook_relay::signature::compute_signature(&args[1], args[2].as_bytes());
    println!("{}", signature);
}
