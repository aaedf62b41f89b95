//! Cross-crate tests of the discovery pipeline with stubbed collaborators.

#[cfg(test)]
mod discovery;
