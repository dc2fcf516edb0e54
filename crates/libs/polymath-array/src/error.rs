//! Error type for polymath.

/// Errors surfaced by array, vector and matrix operations.
///
/// All variants are unrecoverable at the point of detection and propagate
/// to the caller immediately; there are no retries and no silent clamping.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Shape, ndim and size given at construction are mutually
    /// inconsistent, or data length does not match the requested shape.
    #[error("shape {shape:?} implies {expected} element(s), got {actual}")]
    ShapeMismatch {
        /// The requested shape.
        shape: Vec<usize>,
        /// Number of elements the shape implies.
        expected: usize,
        /// Number of elements actually provided.
        actual: usize,
    },

    /// A nested sequence used for shape inference is not rectangular.
    #[error("nested sequence is not rectangular: row {row} has {actual} element(s), expected {expected}")]
    RaggedNested {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        actual: usize,
    },

    /// Two operands' shapes are neither broadcast- nor
    /// multiplication-conformable for the attempted operation.
    #[error("operation '{op}' not defined between shapes {lhs:?} and {rhs:?}")]
    IncompatibleShapes {
        /// The attempted operation.
        op: &'static str,
        /// Left-hand operand shape.
        lhs: Vec<usize>,
        /// Right-hand operand shape.
        rhs: Vec<usize>,
    },

    /// Integer index outside `[-size, size)`.
    #[error("index {index} is out of bounds for size {size}")]
    IndexOutOfBounds {
        /// The attempted index.
        index: isize,
        /// Size of the indexed container.
        size: usize,
    },

    /// Fixed-shape construction would silently drop trailing data.
    #[error("cannot build {target} ({size} component(s)) from {provided} component(s) without dropping data")]
    DataLoss {
        /// Name of the fixed-shape target type.
        target: &'static str,
        /// Size of the target type.
        size: usize,
        /// Number of components provided.
        provided: usize,
    },

    /// Inverse or adjugate requested on a matrix whose determinant is zero
    /// within tolerance.
    #[error("matrix is singular (determinant {det:e} within tolerance)")]
    SingularMatrix {
        /// The computed determinant.
        det: f64,
    },

    /// A geometric query received a degenerate configuration, e.g.
    /// barycentric weights for a point outside a non-planar polygon.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),
}

impl Error {
    pub(crate) fn incompatible(op: &'static str, lhs: &[usize], rhs: &[usize]) -> Self {
        Error::IncompatibleShapes {
            op,
            lhs: lhs.to_vec(),
            rhs: rhs.to_vec(),
        }
    }
}
