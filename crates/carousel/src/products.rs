//! The product line-up shown in the landing page carousel.

use serde::{Deserialize, Serialize};

/// One carousel slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: String,
    /// Styling key for the slide's glow colour.
    pub accent: String,
}

impl Product {
    pub fn new(title: &str, description: &str, accent: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            accent: accent.to_owned(),
        }
    }
}

/// The three products featured on the page, in display order.
pub fn featured_products() -> Vec<Product> {
    vec![
        Product::new(
            "CellBot",
            "AI-driven platform that streamlines research, drug discovery and care workflows for healthcare teams.",
            "blue",
        ),
        Product::new(
            "Knowledge Base Miner",
            "Extracts key insights from complex data so businesses can decide from comprehensive analysis.",
            "purple",
        ),
        Product::new(
            "General Virtual Chatbot",
            "Round-the-clock customer assistant that automates support conversations.",
            "cyan",
        ),
    ]
}

/// Placeholder slides named `Slide 1..=n`, for demos and simulations.
pub fn numbered_slides(n: usize) -> Vec<Product> {
    (1..=n)
        .map(|i| Product::new(&format!("Slide {i}"), "", "blue"))
        .collect()
}
