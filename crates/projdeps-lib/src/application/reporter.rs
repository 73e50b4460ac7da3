//! Layer reporting for `projdeps source`
//!
//! Text mode prints one line per tier and layer:
//!
//! ```text
//! layer 1 curr: libfoo pkgtool
//! layer 1 base: libbase
//! ```
//!
//! JSON mode prints one object per layer.

use crate::depends::{LayerConfig, SourceOutcome, TraverseHook};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io::Write;

#[derive(Serialize)]
struct LayerRecord<'a> {
    layer: usize,
    #[serde(flatten)]
    config: &'a LayerConfig,
}

/// Hook writing each layer to an output stream
pub struct LayerReporter<W: Write> {
    out: W,
    json: bool,
    layers: usize,
}

impl<W: Write> LayerReporter<W> {
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            layers: 0,
        }
    }

    /// Number of layers reported so far
    pub fn layers(&self) -> usize {
        self.layers
    }

    /// Write the final outcome after traversal
    pub fn finish(mut self, outcome: &SourceOutcome, include_base: bool) -> anyhow::Result<W> {
        if self.json {
            serde_json::to_writer(&mut self.out, outcome)?;
            writeln!(self.out)?;
        } else {
            let mut lines = vec![
                ("seen curr", &outcome.seen.curr),
                ("reference-only curr", &outcome.reference_only.curr),
                ("packaging curr", &outcome.for_packaging.curr),
            ];
            if include_base {
                lines.extend([
                    ("seen base", &outcome.seen.base),
                    ("reference-only base", &outcome.reference_only.base),
                    ("packaging base", &outcome.for_packaging.base),
                ]);
            }
            for (label, projects) in lines {
                writeln!(self.out, "{}: {}", label, join(projects))?;
            }
        }
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> TraverseHook for LayerReporter<W> {
    fn perform(&mut self, layer: &LayerConfig) -> anyhow::Result<()> {
        self.layers += 1;
        if self.json {
            let record = LayerRecord {
                layer: self.layers,
                config: layer,
            };
            serde_json::to_writer(&mut self.out, &record)?;
            writeln!(self.out)?;
            return Ok(());
        }

        writeln!(
            self.out,
            "layer {} curr: {}",
            self.layers,
            join(&layer.curr_projects)
        )?;
        if layer.include_base {
            writeln!(
                self.out,
                "layer {} base: {}",
                self.layers,
                join(&layer.base_projects)
            )?;
        }
        Ok(())
    }
}

fn join(projects: &BTreeSet<String>) -> String {
    projects.iter().map(String::as_str).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    include!("reporter.test.rs");
}
