use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

const SOURCE_MARKER: &str = "_SOURCE_";
const SINK_MARKER: &str = "_SINK_";

/// Which call arguments a sink entry watches.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SinkSelector {
    All,
    /// Position in the call's argument list; the receiver is position 0 for instance calls.
    Index(usize),
}

impl SinkSelector {
    pub(crate) fn selects(self, position: usize) -> bool {
        match self {
            SinkSelector::All => true,
            SinkSelector::Index(index) => index == position,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum TaintClass {
    NotClassified,
    Source { categories: BTreeSet<String> },
    Sink { selector: SinkSelector },
}

/// Exact-match taint source/sink catalog.
#[derive(Clone, Debug, Default)]
pub(crate) struct TaintOracle {
    entries: BTreeMap<String, TaintClass>,
}

impl TaintOracle {
    pub(crate) fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        Self::from_reader(file).with_context(|| format!("failed to read {}", path.display()))
    }

    pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (number, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.with_context(|| format!("read catalog line {}", number + 1))?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() || fields[0].starts_with('#') {
                continue;
            }
            let class = match parse_entry(&fields) {
                Ok(Some(class)) => class,
                Ok(None) => {
                    debug!("taint catalog line {} has no marker", number + 1);
                    continue;
                }
                Err(reason) => {
                    warn!("taint catalog line {} skipped: {reason}", number + 1);
                    continue;
                }
            };
            if let Some(existing) = entries.get(fields[0]) {
                if *existing != class {
                    warn!(
                        "taint catalog line {} redefines {}; keeping the first entry",
                        number + 1,
                        fields[0]
                    );
                }
                continue;
            }
            entries.insert(fields[0].to_string(), class);
        }
        Ok(Self { entries })
    }

    pub(crate) fn classify(&self, full_signature: &str) -> TaintClass {
        self.entries
            .get(full_signature)
            .cloned()
            .unwrap_or(TaintClass::NotClassified)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

fn parse_entry(fields: &[&str]) -> Result<Option<TaintClass>, String> {
    if fields.contains(&SOURCE_MARKER) {
        let categories = fields
            .get(1)
            .filter(|category| **category != "->" && **category != SOURCE_MARKER)
            .map(|category| category.to_string())
            .into_iter()
            .collect();
        return Ok(Some(TaintClass::Source { categories }));
    }
    let Some(marker) = fields.iter().position(|field| *field == SINK_MARKER) else {
        return Ok(None);
    };
    let selector = match fields.get(marker + 1) {
        Some(index) => index
            .parse::<usize>()
            .map(SinkSelector::Index)
            .map_err(|_| format!("sink position `{index}` is not a number"))?,
        None => SinkSelector::All,
    };
    Ok(Some(TaintClass::Sink { selector }))
}
