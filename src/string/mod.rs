/*!
# String Toolkit

Searching, suffix structures, automata and alignment over byte strings
(`&[u8]`, positions zero-based). The sub-modules are re-exported here, so
`use algokit::string::*;` brings the whole toolkit into scope.
*/

mod aho_corasick;
mod alignment;
mod kmp;
mod parser;
mod suffix_array;
mod suffix_automaton;
mod zfunc;

pub use aho_corasick::*;
pub use alignment::*;
pub use kmp::*;
pub use parser::*;
pub use suffix_array::*;
pub use suffix_automaton::*;
pub use zfunc::*;
