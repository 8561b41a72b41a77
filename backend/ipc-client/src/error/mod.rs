pub mod ipc;

pub use ipc::IpcError;
