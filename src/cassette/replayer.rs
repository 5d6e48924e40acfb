//! Replays recorded interactions from a cassette.

use std::collections::HashMap;
use std::path::Path;

use super::format::{Cassette, Interaction};

#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Serves a cassette's interactions sequentially per port/method pair.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Load a cassette file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("{e} ({})", path.display()))?;
        Ok(Self::new(&cassette))
    }

    /// Return the next interaction for the given port and method.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error when the cassette has no (more)
    /// interactions for the pair, listing what it does hold.
    pub fn next_interaction(&mut self, port: &str, method: &str) -> Result<&Interaction, String> {
        let key = PortMethodKey {
            port: port.to_string(),
            method: method.to_string(),
        };

        let Some(queue) = self.queues.get(&key) else {
            let mut available: Vec<String> = self
                .queues
                .keys()
                .map(|k| format!("{}::{}", k.port, k.method))
                .collect();
            available.sort();
            return Err(format!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            ));
        };

        let cursor = self.cursors.entry(key).or_insert(0);
        if *cursor >= queue.len() {
            return Err(format!(
                "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
                 have been consumed. Last interaction was seq={last_seq}.",
                count = queue.len(),
                last_seq = queue.last().map_or(0, |i| i.seq),
            ));
        }

        let interaction = &queue[*cursor];
        *cursor += 1;
        Ok(interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tool_version: "0.1.0".into(),
            interactions,
        }
    }

    fn shell_run(seq: u64, command: &str, exit_code: i32) -> Interaction {
        Interaction {
            seq,
            port: "shell".into(),
            method: "run".into(),
            input: json!({"command": command}),
            output: json!({"ok": {"exit_code": exit_code, "stdout": "", "stderr": ""}}),
        }
    }

    #[test]
    fn serves_each_pair_in_recorded_order() {
        let cassette = make_cassette(vec![
            shell_run(0, "npm install --save react", 0),
            Interaction {
                seq: 1,
                port: "prompt".into(),
                method: "confirm".into(),
                input: json!({"question": "Fix?"}),
                output: json!({"ok": true}),
            },
            shell_run(2, "npx webpack --config webpack.config.json", 1),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);

        assert_eq!(replayer.next_interaction("shell", "run").unwrap().seq, 0);
        let second = replayer.next_interaction("prompt", "confirm").unwrap();
        assert_eq!(second.seq, 1);
        let third = replayer.next_interaction("shell", "run").unwrap();
        assert_eq!(third.seq, 2);
        assert_eq!(third.output["ok"]["exit_code"], 1);
    }

    #[test]
    fn exhausted_pair_is_an_error() {
        let cassette = make_cassette(vec![shell_run(0, "true", 0)]);
        let mut replayer = CassetteReplayer::new(&cassette);

        assert!(replayer.next_interaction("shell", "run").is_ok());
        let err = replayer.next_interaction("shell", "run").unwrap_err();
        assert!(err.contains("Cassette exhausted"));
        assert!(err.contains("seq=0"));
    }

    #[test]
    fn unknown_pair_lists_available_pairs() {
        let cassette = make_cassette(vec![shell_run(0, "true", 0)]);
        let mut replayer = CassetteReplayer::new(&cassette);

        let err = replayer.next_interaction("clock", "now").unwrap_err();
        assert!(err.contains("no interactions recorded"));
        assert!(err.contains("shell::run"));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CassetteReplayer::load(&dir.path().join("shell.cassette.yaml"))
            .err()
            .unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }
}
