/*!
# Graph Toolkit

Classical graph algorithms built on top of the representations in
[`crate::repr`]. All algorithms are re-exported at the top level of this
module, so you can simply do:
```rust
use algokit::{prelude::*, graph::*};
```
and gain access to traversal, connectivity, biconnectivity, max-flow,
matching and shortest-path routines. Where a result is naturally a stream
(components, traversal orders), algorithms are provided as **iterators**.
*/

mod biconnectivity;
mod bipartite;
mod flow;
mod matching;
mod mst;
mod scc;
mod shortest_paths;
mod traversal;

use crate::{edge::*, node::*, ops::*};

pub use biconnectivity::*;
pub use bipartite::*;
pub use flow::*;
pub use matching::*;
pub use mst::*;
pub use scc::*;
pub use shortest_paths::*;
pub use traversal::*;
