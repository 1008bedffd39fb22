//! Async ship-model loading
//!
//! Provides background model loading using threads and channels.
//! The [`ModelLoader`] spawns a worker thread that processes load requests
//! and returns results via a channel; the frame loop polls without blocking.
//! A failed load is not fatal: the caller keeps the placeholder mesh.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use crate::geometry::MeshData;

/// Request to load a model in the background
struct LoadRequest {
    /// Path to the RON mesh file
    path: PathBuf,
    /// Name to report back with the result
    model_name: String,
}

/// Result of a background model load
pub struct LoadResult {
    /// Name given with the request
    pub model_name: String,
    /// The loaded mesh or error
    pub result: Result<MeshData, AssetError>,
}

/// Error type for model loading
#[derive(Debug)]
pub enum AssetError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// RON parse error
    Parse(ron::error::SpannedError),
    /// Mesh parsed but its indices are out of range
    Malformed,
}

impl std::fmt::Display for AssetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetError::Io(e) => write!(f, "Model IO error: {}", e),
            AssetError::Parse(e) => write!(f, "Model parse error: {}", e),
            AssetError::Malformed => write!(f, "Model mesh has out-of-range indices"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Io(e) => Some(e),
            AssetError::Parse(e) => Some(e),
            AssetError::Malformed => None,
        }
    }
}

impl From<io::Error> for AssetError {
    fn from(e: io::Error) -> Self {
        AssetError::Io(e)
    }
}

impl From<ron::error::SpannedError> for AssetError {
    fn from(e: ron::error::SpannedError) -> Self {
        AssetError::Parse(e)
    }
}

/// Load a mesh from a RON file, validating its indices
pub fn load_mesh(path: &std::path::Path) -> Result<MeshData, AssetError> {
    let contents = fs::read_to_string(path)?;
    let mesh: MeshData = ron::from_str(&contents)?;
    if !mesh.is_well_formed() {
        return Err(AssetError::Malformed);
    }
    Ok(mesh)
}

/// Background model loader using a dedicated worker thread
pub struct ModelLoader {
    /// Channel to send load requests to the worker thread
    sender: Sender<LoadRequest>,
    /// Channel to receive load results from the worker thread
    receiver: Receiver<LoadResult>,
}

impl Default for ModelLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelLoader {
    /// Create a new model loader with a background worker thread
    ///
    /// The worker thread runs until the ModelLoader is dropped.
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel::<LoadRequest>();
        let (result_tx, result_rx) = channel::<LoadResult>();

        thread::spawn(move || {
            // Worker loop: process load requests until the channel closes
            while let Ok(request) = request_rx.recv() {
                let result = load_mesh(&request.path);
                let load_result = LoadResult {
                    model_name: request.model_name,
                    result,
                };
                // If the receiver is dropped, we stop
                if result_tx.send(load_result).is_err() {
                    break;
                }
            }
        });

        Self {
            sender: request_tx,
            receiver: result_rx,
        }
    }

    /// Submit a background load request
    ///
    /// Returns false if the worker thread has shut down.
    pub fn load_async<P: Into<PathBuf>, S: Into<String>>(&self, path: P, name: S) -> bool {
        self.sender
            .send(LoadRequest {
                path: path.into(),
                model_name: name.into(),
            })
            .is_ok()
    }

    /// Poll for one completed load without blocking
    pub fn poll(&self) -> Option<LoadResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Poll for all completed loads without blocking
    pub fn poll_all(&self) -> Vec<LoadResult> {
        let mut results = Vec::new();
        while let Some(result) = self.poll() {
            results.push(result);
        }
        results
    }
}
