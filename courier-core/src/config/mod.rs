pub mod loader;
pub mod model;

#[cfg(test)]
mod tests;
