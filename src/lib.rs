// Copyright 2015 Joe Neeman.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/*!
This crate compiles regular expressions into deterministic finite automata (DFAs) and matches
strings against them. Everything is stored in `Graph`, a graph with a fixed number of nodes whose
edges live in fixed-size buckets, so the storage needed by a compilation is bounded up front by a
`Config`.

The supported syntax is small: literal chars, `.` (any char), grouping with `(` and `)`,
alternation with `|`, and the postfix operators `*`, `+` and `?`. A backslash escapes any of these
metacharacters (or itself). Matching is anchored at both ends.

# Example: compiling and matching a `Regex`

```rust
use regex_graph::{compile, matches};
let re = compile("(ab|c)*d").unwrap();
assert!(matches(&re, "abcabd"));
assert!(!matches(&re, "abca"));
```

# Example: running out of room

```rust
use regex_graph::{Config, Error, Regex};
use regex_graph::error::Resource;
let config = Config::new().dfa_states(2);
assert_eq!(Regex::with_config("abc", &config).unwrap_err(),
           Error::CapacityExhausted(Resource::DfaStates));
```
*/

pub mod ast;
pub mod config;
pub mod dfa;
pub mod error;
pub mod graph;
pub mod nfa;
pub mod parser;
pub mod regex;
pub mod tokenizer;

pub use crate::config::Config;
pub use crate::dfa::Dfa;
pub use crate::error::Error;
pub use crate::graph::Graph;
pub use crate::nfa::Nfa;
pub use crate::regex::{compile, matches, Regex};

pub type Result<T> = std::result::Result<T, Error>;
