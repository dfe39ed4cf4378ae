pub mod ai;
pub mod catch;
pub mod damage;
pub mod engine;
pub mod escape;
pub mod state;

#[cfg(test)]
mod tests;
