//! Reaching-definitions analysis over resolved function bodies.
//!
//! One [`analyze`] call decorates a single function body with pre/post
//! reaching-definition facts and reports uses of possibly-undefined values
//! and dead code through the given sink. Each run owns its definition-item
//! arena and fact stores; they are returned for post-passes and dropped
//! together.

mod def_item;
mod def_point;
mod facts;
pub mod fold;
mod lvalue;
mod rd_walk;
mod reachability;
mod reaching;

pub use def_item::{DefItem, DefItemArena, DefItemId};
pub use def_point::DefPoint;
pub use facts::FlowFacts;
pub use rd_walk::RdWalker;
pub use reachability::{ReachCtx, reaches_end};
pub use reaching::ReachingDefs;

use crate::diag::DiagnosticSink;
use crate::ident::{IdentId, IdentTable};
use crate::tree::model::{Func, Stmt};
use crate::tree::visit::{walk_func, walk_stmt};

/// Analyzer toggles. Hosts construct this once, typically via
/// [`AnalyzerConfig::from_env`], and pass it to every [`analyze`] call.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// When false, `analyze` is a no-op.
    pub enabled: bool,
    /// When set, only the function with this name is analyzed.
    pub only_func: Option<String>,
    /// Dump pre/post reaching-def sets to stderr during traversal.
    pub trace: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            only_func: None,
            trace: false,
        }
    }
}

impl AnalyzerConfig {
    /// Read the toggles from the environment: `HERON_ANALY` activates the
    /// analysis, `HERON_ONLY` restricts it to one function (and activates
    /// it), `HERON_TRACE` turns on traversal dumps.
    pub fn from_env() -> Self {
        let only_func = std::env::var("HERON_ONLY").ok();
        Self {
            enabled: std::env::var_os("HERON_ANALY").is_some() || only_func.is_some(),
            only_func,
            trace: std::env::var_os("HERON_TRACE").is_some(),
        }
    }
}

/// The products of one analysis run, available to post-passes for as long
/// as the value lives.
pub struct FuncAnalysis {
    pub items: DefItemArena,
    pub facts: FlowFacts,
}

/// Run the reaching-definitions analysis over one body of `func`.
///
/// `inits` are the identifiers the language initializes at function entry
/// alongside the formal parameters. Returns `None` when the configuration
/// disables the analysis or filters this function out.
pub fn analyze(
    func: &Func,
    inits: &[IdentId],
    body: &Stmt,
    idents: &IdentTable,
    config: &AnalyzerConfig,
    sink: &mut dyn DiagnosticSink,
) -> Option<FuncAnalysis> {
    if !config.enabled {
        return None;
    }
    if let Some(only) = &config.only_func
        && only != &func.name
    {
        return None;
    }

    let mut walker = RdWalker::new(idents, sink, config.trace);
    // Entry installs the parameter definitions and aborts; descending into
    // the bodies here would also visit sibling overload bodies.
    walk_func(&mut walker, func);
    walker.track_inits(func, inits);
    walk_stmt(&mut walker, body);

    Some(walker.into_analysis())
}
