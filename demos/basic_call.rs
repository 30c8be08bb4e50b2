//! Basic example demonstrating declarative GET and POST requests.
//!
//! This example shows how to:
//! - Build request configurations with query parameters and bodies
//! - Inspect the normalized configuration before sending
//! - Access response data and metadata
//!
//! Run with: `cargo run --example basic_call`

use plainreq::{Client, Error, PreparedRequest, RequestConfig};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct NewPost {
    title: String,
    body: String,
    #[serde(rename = "userId")]
    user_id: u32,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("plainreq=debug,basic_call=info")
        .init();

    let client = Client::builder()
        .default_header("User-Agent", "plainreq-demo/0.1")?
        .build()?;

    println!("=== GET Request Example ===");
    let config = RequestConfig::new("https://jsonplaceholder.typicode.com/comments")
        .param("postId", 1)
        .param("tags", vec!["a b", "c"]);

    let response = client.request(config).await?;
    println!("Status code: {}", response.status);
    println!("Request latency: {:?}", response.latency);
    println!("Body length: {} bytes", response.raw_body.len());
    println!();

    println!("=== Normalized POST Configuration ===");
    let new_post = NewPost {
        title: "My New Post".to_string(),
        body: "This is the content of my new post!".to_string(),
        user_id: 1,
    };

    let mut config = RequestConfig::new("https://jsonplaceholder.typicode.com/posts")
        .method("post")
        .json(&new_post)?;
    config.process()?;

    let prepared = PreparedRequest::from_config(config)?;
    println!("{} {}", prepared.method, prepared.url);
    for (name, value) in prepared.headers.iter() {
        println!("{}: {}", name, value);
    }
    if let Some(text) = prepared.body.as_ref().and_then(|body| body.as_text()) {
        println!("{}", text);
    }
    println!();

    println!("=== POST Request Example ===");
    let response = client.dispatch(prepared).await?;
    println!("Status code: {}", response.status);
    println!("Content-Type: {:?}", response.header("content-type"));
    println!("Created: {}", response.raw_body);

    Ok(())
}
