//! Element and attribute names of the design format

/// Root element
pub mod header {
    pub const DESIGN: &str = "design";
    pub const VERSION: &str = "version";
}

pub mod node {
    pub const ELEMENT: &str = "node";
    pub const INDEX: &str = "index";
    pub const X: &str = "x";
    pub const Y: &str = "y";
    pub const TEXT: &str = "text";
}

pub mod edge {
    pub const ELEMENT: &str = "edge";
    pub const SOURCE: &str = "source";
    pub const TARGET: &str = "target";
    pub const ARROW_MODE: &str = "arrowMode";
    pub const REVERSED: &str = "reversed";
    pub const DASHED: &str = "dashed";
    pub const TEXT: &str = "text";
}

/// Version reported for documents whose root has no version attribute
pub const UNDEFINED_VERSION: &str = "UNDEFINED";
