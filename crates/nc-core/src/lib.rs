pub mod error;
pub mod format;
pub mod geometry;
pub mod graph;
pub mod id;
pub mod model;
pub mod selection;
pub mod viewport;

pub use error::FormatError;
pub use format::{DecodedGraph, FileEdge, FileNode, FileNodeType, GraphFile, parse_graph_file, to_canvas_json};
pub use geometry::{Bounds, MIN_NODE_HEIGHT, MIN_NODE_WIDTH, Side, best_sides};
pub use graph::{CanvasGraph, LoadReport};
pub use id::{EdgeId, NodeId};
pub use model::*;
pub use selection::Selection;
pub use viewport::{MAX_SCALE, MIN_SCALE, Viewport};
