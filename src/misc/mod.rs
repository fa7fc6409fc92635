mod token_set;
pub use token_set::{Iter, TokenSet};
