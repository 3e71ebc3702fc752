//! # gaviz
//!
//! Interactive 3D visualization of geometric-algebra expressions.
//!
//! gaviz is the glue between three collaborators it does not own — an
//! expression parser, an algebraic evaluator, and a windowing/render
//! driver — and the state they share: the annotated expression tree the
//! user inspects and the retained 3D scene the toggled sub-expressions
//! live in.
//!
//! ## Architecture
//!
//! The workspace is organized as three crates plus this facade:
//!
//! 1. **gaviz-core** - Multivector model, value decoding, AST types,
//!    collaborator interfaces
//! 2. **gaviz-tree** - Display-tree construction and selection tracking
//! 3. **gaviz-scene** - Scene registry, mesh primitives, grid, camera,
//!    glow renderer
//! 4. **gaviz** - [`VisualizerSession`], the one object an embedding UI
//!    drives
//!
//! ## Usage
//!
//! ```no_run
//! # use gaviz::{VisualizerSession, Multivector};
//! # fn parser() -> Box<dyn gaviz::ExpressionParser> { unimplemented!() }
//! # fn evaluator() -> Box<dyn gaviz::Evaluator> { unimplemented!() }
//! let mut session = VisualizerSession::new(parser(), evaluator())?;
//! session.bind("a", Multivector::vector(1.0, 0.0, 0.0))?;
//! session.set_expression("a + b")?;
//! if let Some(tree) = session.tree() {
//!     let id = tree.id.clone();
//!     session.toggle(&id)?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod session;

pub use session::VisualizerSession;

pub use gaviz_core::{
    decode, find_identifiers, AstKind, AstNode, BinaryOperator, Bindings, DecodedValue, Error,
    EvalError, Evaluator, ExpressionParser, Multivector, ParseError, Result, UnaryOperator,
    ValueClass, ValueKind, ValueNode,
};

pub use gaviz_tree::{
    build_tree, build_tree_result, DisplayKind, DisplayNode, SceneIntent, SelectionTracker, Toggle,
};

pub use gaviz_scene::{
    GridController, LightingParams, MeshRenderer, OrbitCamera, SceneEntity, SceneError,
    SceneRegistry, SceneStats, TextLabel, DEFAULT_GRID_SIZE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
