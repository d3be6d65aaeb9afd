pub mod blocks;
pub mod og;
