// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The analyses the dashboard knows about.

use core::fmt;

/// What an analysis is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A monitored machine; its series are sampled over wall-clock time.
    Computer,
    /// A training run; its series are indexed by step.
    Run,
}

impl Entity {
    /// Lowercase name, as used in paths and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Computer => "computer",
            Self::Run => "run",
        }
    }

    /// Parses [`Entity::as_str`] output.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "computer" => Some(Self::Computer),
            "run" => Some(Self::Run),
            _ => None,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One kind of analysis series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SeriesKind {
    /// Path segment and lookup name.
    pub name: &'static str,
    /// Card title.
    pub title: &'static str,
    /// Owning entity.
    pub entity: Entity,
}

impl SeriesKind {
    /// Processor usage.
    pub const CPU: Self = Self::computer("cpu", "CPU");
    /// Memory usage.
    pub const MEMORY: Self = Self::computer("memory", "Memory");
    /// Disk usage.
    pub const DISK: Self = Self::computer("disk", "Disk");
    /// Network traffic.
    pub const NETWORK: Self = Self::computer("network", "Network");
    /// Per-process usage.
    pub const PROCESS: Self = Self::computer("process", "Processes");
    /// Training metrics.
    pub const METRICS: Self = Self::run("metrics", "Metrics");
    /// Gradient statistics.
    pub const GRADIENTS: Self = Self::run("gradients", "Gradients");
    /// Module output statistics.
    pub const OUTPUTS: Self = Self::run("outputs", "Outputs");

    /// Every known kind, in card order.
    pub const ALL: [Self; 8] = [
        Self::CPU,
        Self::MEMORY,
        Self::DISK,
        Self::NETWORK,
        Self::PROCESS,
        Self::METRICS,
        Self::GRADIENTS,
        Self::OUTPUTS,
    ];

    const fn computer(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            entity: Entity::Computer,
        }
    }

    const fn run(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            entity: Entity::Run,
        }
    }

    /// Whether steps are unix seconds, charted on a time axis.
    pub fn is_time_series(&self) -> bool {
        self.entity == Entity::Computer
    }

    /// Looks a kind up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name == name)
    }

    /// The kinds attached to `entity`, in card order.
    pub fn for_entity(entity: Entity) -> impl Iterator<Item = Self> {
        Self::ALL.into_iter().filter(move |k| k.entity == entity)
    }
}

impl fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
