//! Workflow engine: a validated DAG of stages run in dependency order.
//!
//! Build with `WorkflowEngine::builder().stage(..)`, then `build()` to validate
//! prerequisites and fix the execution order. `run` threads one state through
//! every stage; a stage runs only after all of its prerequisites have completed.
//! The engine adds no error handling of its own: item isolation belongs to the stages.

use std::collections::HashMap;
use std::time::Instant;

use thiserror::Error;
use tracing::info;

use crate::workflow::stage::{Stage, StageError};
use crate::workflow::state::WorkflowState;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("stage '{0}' registered more than once")]
    DuplicateStage(&'static str),

    #[error("stage '{stage}' depends on unknown stage '{dependency}'")]
    UnknownDependency {
        stage: &'static str,
        dependency: &'static str,
    },

    #[error("dependency cycle among stages: {}", .0.join(", "))]
    Cycle(Vec<&'static str>),
}

#[derive(Default)]
pub struct EngineBuilder {
    stages: Vec<Box<dyn Stage>>,
}

impl EngineBuilder {
    pub fn stage(mut self, stage: impl Stage + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Validates the graph and orders stages topologically.
    ///
    /// Among stages that are ready at the same time, registration order wins,
    /// so a chain registered in order runs in that order.
    pub fn build(self) -> Result<WorkflowEngine, GraphError> {
        let mut index: HashMap<&'static str, usize> = HashMap::new();
        for (i, stage) in self.stages.iter().enumerate() {
            if index.insert(stage.name(), i).is_some() {
                return Err(GraphError::DuplicateStage(stage.name()));
            }
        }

        let mut pending_deps = vec![0usize; self.stages.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); self.stages.len()];
        for (i, stage) in self.stages.iter().enumerate() {
            for &dependency in stage.depends_on() {
                let &d = index
                    .get(dependency)
                    .ok_or(GraphError::UnknownDependency {
                        stage: stage.name(),
                        dependency,
                    })?;
                pending_deps[i] += 1;
                dependents[d].push(i);
            }
        }

        let mut order = Vec::with_capacity(self.stages.len());
        let mut done = vec![false; self.stages.len()];
        while let Some(next) = (0..self.stages.len()).find(|&i| !done[i] && pending_deps[i] == 0) {
            done[next] = true;
            order.push(next);
            for &dependent in &dependents[next] {
                pending_deps[dependent] -= 1;
            }
        }

        if order.len() < self.stages.len() {
            let stuck = self
                .stages
                .iter()
                .enumerate()
                .filter(|(i, _)| !done[*i])
                .map(|(_, s)| s.name())
                .collect();
            return Err(GraphError::Cycle(stuck));
        }

        let mut slots: Vec<Option<Box<dyn Stage>>> = self.stages.into_iter().map(Some).collect();
        let stages = order.into_iter().filter_map(|i| slots[i].take()).collect();
        Ok(WorkflowEngine { stages })
    }
}

pub struct WorkflowEngine {
    /// Topologically ordered.
    stages: Vec<Box<dyn Stage>>,
}

impl WorkflowEngine {
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Stage names in execution order.
    pub fn order(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub async fn run(&self, mut state: WorkflowState) -> Result<WorkflowState, StageError> {
        for stage in &self.stages {
            let started = Instant::now();
            info!("Stage {} started", stage.name());
            stage.run(&mut state).await?;
            info!(
                "Stage {} finished in {}ms",
                stage.name(),
                started.elapsed().as_millis()
            );
        }
        Ok(state)
    }
}
