//! Visualizer session
//!
//! The one stateful object an embedding UI drives. It owns the source
//! text, the variable bindings, the current display tree, the selection
//! tracker, and the scene registry, and keeps them mutually consistent:
//! every keystroke re-parses and re-evaluates, rebuilds the display tree
//! wholesale, and reconciles the active selections against it — nodes that
//! vanished leave the scene, nodes whose value changed get their geometry
//! replaced.

use anyhow::Result;
use gaviz_core::{find_identifiers, Bindings, Evaluator, ExpressionParser, Multivector};
use gaviz_scene::{GridController, MeshRenderer, OrbitCamera, SceneRegistry};
use gaviz_tree::display::{build_tree, error_node, DisplayNode};
use gaviz_tree::selection::{SceneIntent, SelectionTracker};
use glam::DVec3;
use tracing::{debug, info};

/// Session state for one expression visualizer instance
pub struct VisualizerSession {
    parser: Box<dyn ExpressionParser>,
    evaluator: Box<dyn Evaluator>,
    bindings: Bindings,
    source: String,
    tree: Option<DisplayNode>,
    tracker: SelectionTracker,
    registry: SceneRegistry,
    grid: GridController,
}

impl VisualizerSession {
    /// Create a session around the given collaborators.
    ///
    /// Starts with an empty expression, no bindings, and the default
    /// reference grid installed.
    pub fn new(
        parser: Box<dyn ExpressionParser>,
        evaluator: Box<dyn Evaluator>,
    ) -> Result<Self> {
        let mut registry = SceneRegistry::new();
        let mut grid = GridController::new();
        grid.ensure_default(&mut registry)?;

        Ok(Self {
            parser,
            evaluator,
            bindings: Bindings::new(),
            source: String::new(),
            tree: None,
            tracker: SelectionTracker::new(),
            registry,
            grid,
        })
    }

    /// Replace the expression text and rebuild the display tree.
    ///
    /// Parse and evaluation failures do not fail the call: they produce
    /// the error-sentinel tree so the UI always has something to show.
    /// Free identifiers without a binding are seeded with zero.
    pub fn set_expression(&mut self, source: &str) -> Result<()> {
        self.source = source.to_string();
        self.rebuild()
    }

    /// Bind (or rebind) a variable and re-evaluate the current expression.
    ///
    /// Active nodes whose value changes get their scene geometry replaced
    /// in place.
    pub fn bind(&mut self, name: impl Into<String>, value: Multivector) -> Result<()> {
        let name = name.into();
        debug!(%name, "binding updated");
        self.bindings.insert(name, value);
        self.rebuild()
    }

    /// Toggle a display node in or out of the 3D scene.
    ///
    /// Returns whether the node is active afterwards. Unknown ids and
    /// undrawable nodes are no-ops.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let Some(node) = self.tree.as_ref().and_then(|tree| tree.find(id)).cloned() else {
            debug!(id, "toggle ignored: no such node");
            return Ok(false);
        };

        let toggle = self.tracker.toggle(&node);
        match toggle.intent {
            Some(SceneIntent::Add { name, value }) => {
                if let Err(err) = self.registry.add(&name, &value) {
                    // keep tracker and scene agreeing
                    self.tracker.forget(id);
                    return Err(err.into());
                }
            }
            Some(SceneIntent::Remove { name }) => {
                self.registry.remove(&name);
            }
            None => {}
        }
        Ok(toggle.activated)
    }

    /// Add a standalone named vector to the scene (manual entry, outside
    /// the expression tree)
    pub fn add_vector(&mut self, name: &str, position: DVec3) -> Result<()> {
        self.registry.add_with_position(name, position)?;
        Ok(())
    }

    /// Remove every entity the user has toggled or added; the grid stays
    pub fn clear_scene(&mut self) {
        let names: Vec<String> = self.registry.names().iter().map(|n| n.to_string()).collect();
        for name in names {
            self.registry.remove(&name);
        }
        self.tracker.clear();
        info!("scene entities cleared");
    }

    /// Resize the reference grid
    pub fn set_grid_size(&mut self, size: u32) -> Result<()> {
        self.grid.set_size(&mut self.registry, size)?;
        Ok(())
    }

    /// The current grid size
    pub fn grid_size(&self) -> Option<u32> {
        self.grid.size()
    }

    /// The current display tree, if any expression is set
    pub fn tree(&self) -> Option<&DisplayNode> {
        self.tree.as_ref()
    }

    /// The current expression text
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Current variable bindings
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Whether the given display-node id is active in the scene
    pub fn is_active(&self, id: &str) -> bool {
        self.tracker.is_active(id)
    }

    /// Active display-node ids in activation order
    pub fn active_ids(&self) -> &[String] {
        self.tracker.active_ids()
    }

    /// The scene registry (read access for the render driver and UI)
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// Attach a GL renderer; the current scene contents are uploaded
    pub fn attach_renderer(&mut self, renderer: MeshRenderer) -> Result<()> {
        self.registry.attach_renderer(renderer)?;
        Ok(())
    }

    /// Detach the renderer, releasing every GPU resource
    pub fn detach_renderer(&mut self) {
        self.registry.detach_renderer();
    }

    /// Draw one frame through the given camera. Headless: no-op.
    pub fn render(&self, camera: &OrbitCamera) {
        self.registry
            .render(&camera.view_matrix(), &camera.projection_matrix());
    }

    /// Re-parse and re-evaluate the current source, then swap in the new
    /// tree and reconcile selections against it.
    fn rebuild(&mut self) -> Result<()> {
        let new_tree = if self.source.trim().is_empty() {
            None
        } else {
            match self.parser.parse(&self.source) {
                Ok(ast) => {
                    for name in find_identifiers(&ast) {
                        self.bindings.entry(name).or_insert_with(Multivector::zero);
                    }
                    match self.evaluator.evaluate(&ast, &self.bindings) {
                        Ok(annotated) => build_tree(Some(&annotated), &self.source),
                        Err(err) => Some(error_node(&err.to_string())),
                    }
                }
                Err(err) => Some(error_node(&err.to_string())),
            }
        };
        self.reconcile(new_tree)
    }

    /// Bring the scene in line with a freshly built tree.
    ///
    /// Selections are keyed by structural id, so a node that still exists
    /// after the rebuild keeps its selection; its geometry is replaced if
    /// the value changed. Selections whose node vanished are dropped from
    /// both the tracker and the scene.
    fn reconcile(&mut self, new_tree: Option<DisplayNode>) -> Result<()> {
        let active: Vec<String> = self.tracker.active_ids().to_vec();
        for id in active {
            let old_label = self
                .tree
                .as_ref()
                .and_then(|tree| tree.find(&id))
                .map(|node| node.label.clone());
            let survivor = new_tree.as_ref().and_then(|tree| tree.find(&id));

            match survivor {
                Some(node) if node.value.is_drawable() => {
                    // same structure can carry new source text (whitespace
                    // edits); the scene is keyed by label
                    if let Some(old) = old_label.filter(|label| *label != node.label) {
                        self.registry.remove(&old);
                    }
                    if self.registry.has(&node.label) {
                        self.registry.update(&node.label, &node.value)?;
                    } else {
                        self.registry.add(&node.label, &node.value)?;
                    }
                }
                _ => {
                    if let Some(label) = old_label {
                        self.registry.remove(&label);
                    }
                    self.tracker.forget(&id);
                    debug!(%id, "selection dropped: node left the tree");
                }
            }
        }
        self.tree = new_tree;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaviz_core::ast::{AstKind, AstNode, ValueKind, ValueNode};
    use gaviz_core::error::{EvalError, ParseError};

    /// Parser stub: accepts exactly one identifier token.
    struct SingleIdentParser;

    impl ExpressionParser for SingleIdentParser {
        fn parse(&self, text: &str) -> std::result::Result<AstNode, ParseError> {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(ParseError::EmptyInput);
            }
            if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
                return Err(ParseError::Syntax {
                    offset: 0,
                    message: "expected identifier".to_string(),
                });
            }
            let start = text.len() - text.trim_start().len();
            Ok(AstNode {
                start,
                end: start + trimmed.len() - 1,
                kind: AstKind::Identifier {
                    name: trimmed.to_string(),
                },
            })
        }
    }

    /// Evaluator stub: looks identifiers up in the bindings.
    struct LookupEvaluator;

    impl Evaluator for LookupEvaluator {
        fn evaluate(
            &self,
            ast: &AstNode,
            bindings: &Bindings,
        ) -> std::result::Result<ValueNode, EvalError> {
            match &ast.kind {
                AstKind::Identifier { name } => Ok(ValueNode {
                    start: ast.start,
                    end: ast.end,
                    value: bindings.get(name).copied().unwrap_or_else(Multivector::zero),
                    kind: ValueKind::Identifier { name: name.clone() },
                }),
                _ => Err(EvalError::Other {
                    message: "identifiers only".to_string(),
                }),
            }
        }
    }

    fn session() -> VisualizerSession {
        VisualizerSession::new(Box::new(SingleIdentParser), Box::new(LookupEvaluator)).unwrap()
    }

    #[test]
    fn test_toggle_adds_and_removes_entity() {
        let mut session = session();
        session.bind("a", Multivector::vector(1.0, 0.0, 0.0)).unwrap();
        session.set_expression("a").unwrap();

        let id = session.tree().unwrap().id.clone();
        assert!(session.toggle(&id).unwrap());
        assert!(session.registry().has("a"));

        assert!(!session.toggle(&id).unwrap());
        assert!(!session.registry().has("a"));
        assert!(session.active_ids().is_empty());
    }

    #[test]
    fn test_rebind_replaces_active_geometry() {
        let mut session = session();
        session.bind("a", Multivector::vector(1.0, 0.0, 0.0)).unwrap();
        session.set_expression("a").unwrap();
        let id = session.tree().unwrap().id.clone();
        session.toggle(&id).unwrap();

        session.bind("a", Multivector::vector(0.0, 0.0, 3.0)).unwrap();

        assert!(session.is_active(&id));
        let entity = session.registry().entity("a").unwrap();
        assert_eq!(entity.targets[0], DVec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn test_stale_selection_leaves_scene() {
        let mut session = session();
        session.bind("a", Multivector::vector(1.0, 0.0, 0.0)).unwrap();
        session.set_expression("a").unwrap();
        let id = session.tree().unwrap().id.clone();
        session.toggle(&id).unwrap();

        session.set_expression("b").unwrap();

        assert!(!session.is_active(&id));
        assert!(!session.registry().has("a"));
        // grid untouched by the reconciliation
        assert!(session.registry().has_grid());
    }

    #[test]
    fn test_parse_failure_degrades_to_sentinel() {
        let mut session = session();
        session.set_expression("1 +").unwrap();
        let tree = session.tree().unwrap();
        assert!(tree.is_error());
    }

    #[test]
    fn test_empty_expression_clears_tree() {
        let mut session = session();
        session.set_expression("a").unwrap();
        assert!(session.tree().is_some());
        session.set_expression("   ").unwrap();
        assert!(session.tree().is_none());
    }

    #[test]
    fn test_unknown_identifier_seeds_zero_binding() {
        let mut session = session();
        session.set_expression("q").unwrap();
        assert_eq!(session.bindings().get("q"), Some(&Multivector::zero()));
        // zero is undrawable, so toggling it is a no-op
        let id = session.tree().unwrap().id.clone();
        assert!(!session.toggle(&id).unwrap());
        assert!(!session.registry().has("q"));
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut session = session();
        assert!(!session.toggle("id:nope").unwrap());
    }

    #[test]
    fn test_default_grid_installed() {
        let session = session();
        assert_eq!(session.grid_size(), Some(gaviz_scene::DEFAULT_GRID_SIZE));
        assert!(session.registry().has_grid());
    }

    #[test]
    fn test_clear_scene_keeps_grid() {
        let mut session = session();
        session.add_vector("v", DVec3::new(1.0, 2.0, 0.0)).unwrap();
        session.clear_scene();
        assert!(session.registry().is_empty());
        assert!(session.registry().has_grid());
    }
}
