use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::loss::wmw::WmwLoss;

impl WmwLoss {
    /// Serializes `{gamma, p}` to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        // Dropping the writer would swallow a failed final write.
        writer.flush()?;
        debug!(path = %path.display(), gamma = self.gamma(), p = self.p(), "saved wmw loss config");
        Ok(())
    }

    /// Loads a configuration written by `save_json`. Missing fields take the
    /// defaults; out-of-range values are rejected.
    pub fn load_json(path: impl AsRef<Path>) -> Result<WmwLoss> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let loss: WmwLoss = serde_json::from_reader(reader)?;
        debug!(path = %path.display(), gamma = loss.gamma(), p = loss.p(), "loaded wmw loss config");
        Ok(loss)
    }
}
