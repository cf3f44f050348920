pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

pub use html::{extract_hrefs, extract_hrefs_from_str};
pub use text::extract_candidate_urls;
