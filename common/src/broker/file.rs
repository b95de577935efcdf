use std::{fmt, path::PathBuf};

use anyhow::{anyhow, Result};
use bytes::{BufMut, Bytes, BytesMut};
use gst::{BufferRef, DebugCategory, FlowError, FlowSuccess};
use tokio::{
    fs::File,
    io::{AsyncWriteExt, BufWriter},
    runtime::Handle,
    sync::mpsc,
    task::JoinHandle,
};

use crate::{
    filter::{BufferFilter, PayloadBroker},
    payload::csv,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileFormat {
    /// Length-delimited protobuf batches.
    Proto,
    /// One smart_distancing row per frame.
    Csv,
}

impl FileFormat {
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Proto => "pb",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proto => "proto".fmt(f),
            Self::Csv => "csv".fmt(f),
        }
    }
}

/// Appends every payload to `<basepath>.<extension>`.
pub struct FileMetaBroker {
    cat: DebugCategory,
    format: FileFormat,
    handle: Handle,
    path: PathBuf,
    queue: Option<Queue>,
}

impl FileMetaBroker {
    pub fn new(cat: DebugCategory, handle: Handle, basepath: &str, format: FileFormat) -> Self {
        Self {
            cat,
            format,
            handle,
            path: format!("{basepath}.{}", format.extension()).into(),
            queue: None,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn chunk(&self, payload: Bytes) -> Result<Bytes> {
        match self.format {
            FileFormat::Proto => {
                super::decode(payload.clone())?;

                let len = payload.len();
                let mut chunk = BytesMut::with_capacity(::prost::length_delimiter_len(len) + len);
                ::prost::encode_length_delimiter(len, &mut chunk)?;
                chunk.put(payload);
                Ok(chunk.freeze())
            }
            FileFormat::Csv => {
                let batch = super::decode(payload)?;

                let mut chunk = String::new();
                for frame in &batch.frames {
                    chunk.push_str(&csv::row(frame)?);
                    chunk.push('\n');
                }
                Ok(chunk.into())
            }
        }
    }
}

impl BufferFilter for FileMetaBroker {
    fn on_buffer(&mut self, buffer: &mut BufferRef) -> Result<FlowSuccess, FlowError> {
        let Some(payload) = super::payload(self.cat, buffer) else {
            return Ok(FlowSuccess::Ok);
        };

        let chunk = self.chunk(payload).map_err(|error| {
            gst::error!(self.cat, "Failed to format payload: {error}");
            FlowError::Error
        })?;

        let queue = self.queue.as_ref().ok_or(FlowError::Flushing)?;
        queue.tx.blocking_send(chunk).map_err(|error| {
            gst::error!(
                self.cat,
                "Failed to write to {}: {error}",
                self.path.display(),
            );
            FlowError::Error
        })?;
        Ok(FlowSuccess::Ok)
    }
}

impl PayloadBroker for FileMetaBroker {
    fn start(&mut self) -> Result<()> {
        if self.queue.is_some() {
            return Ok(());
        }

        let file = self.handle.block_on(File::create(&self.path)).map_err(|error| {
            anyhow!("failed to create {}: {error}", self.path.display())
        })?;

        let header = match self.format {
            FileFormat::Proto => None,
            FileFormat::Csv => Some(Bytes::from(format!("{}\n", csv::HEADER))),
        };

        self.queue.replace(Queue::spawn(self.cat, &self.handle, file, header));
        gst::info!(self.cat, "Writing {} to {}", self.format, self.path.display());
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        match self.queue.take() {
            Some(queue) => queue.close(&self.handle),
            None => Ok(()),
        }
    }
}

struct Queue {
    producer: JoinHandle<Result<()>>,
    tx: mpsc::Sender<Bytes>,
}

impl Queue {
    fn spawn(cat: DebugCategory, handle: &Handle, file: File, header: Option<Bytes>) -> Self {
        let (tx, mut rx) = mpsc::channel::<Bytes>(16);
        Self {
            producer: handle.spawn(async move {
                let mut writer = BufWriter::new(file);
                if let Some(header) = header {
                    writer.write_all(&header).await?;
                }

                while let Some(chunk) = rx.recv().await {
                    if let Err(error) = writer.write_all(&chunk).await {
                        gst::error!(cat, "Failed to write payload: {error}");
                        return Err(error.into());
                    }
                }
                writer.flush().await?;
                anyhow::Ok(())
            }),
            tx,
        }
    }

    /// Closes the channel and waits until everything sent is on disk.
    fn close(self, handle: &Handle) -> Result<()> {
        let Self { producer, tx } = self;

        drop(tx);
        handle.block_on(producer)?
    }
}

#[cfg(test)]
mod tests {
    use prost::Message;
    use tokio::runtime::Runtime;

    use super::*;
    use crate::payload::{meta, Batch, Frame};

    fn payload_buffer(frame_num: i32) -> gst::Buffer {
        let batch = Batch {
            frames: vec![Frame {
                frame_num,
                pts: 5,
                people: vec![],
                sum_danger: 0.0,
            }],
        };

        let mut buffer = gst::Buffer::with_size(8).unwrap();
        meta::attach(
            buffer.get_mut().unwrap(),
            Bytes::from(batch.encode_to_vec()),
        )
        .unwrap();
        buffer
    }

    fn init() -> Runtime {
        gst::init().unwrap();
        meta::register();
        Runtime::new().unwrap()
    }

    #[test]
    fn test_proto_file() {
        let runtime = init();
        let dir = ::tempfile::tempdir().unwrap();
        let basepath = dir.path().join("out");

        let mut broker = FileMetaBroker::new(
            *gst::CAT_RUST,
            runtime.handle().clone(),
            basepath.to_str().unwrap(),
            FileFormat::Proto,
        );
        assert_eq!(broker.path(), &dir.path().join("out.pb"));

        broker.start().unwrap();
        for frame_num in 0..3 {
            let mut buffer = payload_buffer(frame_num);
            broker.on_buffer(buffer.get_mut().unwrap()).unwrap();
        }
        broker.stop().unwrap();

        let data = std::fs::read(dir.path().join("out.pb")).unwrap();
        let mut data = Bytes::from(data);
        let mut frames = vec![];
        while !data.is_empty() {
            let batch = Batch::decode_length_delimited(&mut data).unwrap();
            frames.push(batch.frames[0].frame_num);
        }
        assert_eq!(frames, [0, 1, 2]);
    }

    #[test]
    fn test_csv_file() {
        let runtime = init();
        let dir = ::tempfile::tempdir().unwrap();
        let basepath = dir.path().join("out");

        let mut broker = FileMetaBroker::new(
            *gst::CAT_RUST,
            runtime.handle().clone(),
            basepath.to_str().unwrap(),
            FileFormat::Csv,
        );
        broker.start().unwrap();

        let mut buffer = payload_buffer(0);
        broker.on_buffer(buffer.get_mut().unwrap()).unwrap();

        // buffers without payload are skipped
        let mut empty = gst::Buffer::with_size(8).unwrap();
        broker.on_buffer(empty.get_mut().unwrap()).unwrap();

        broker.stop().unwrap();
        broker.stop().unwrap();

        let data = std::fs::read_to_string(dir.path().join("out.csv")).unwrap();
        assert_eq!(data, format!("{}\n5,0,0,0.000,[],[]\n", csv::HEADER));
    }

    #[test]
    fn test_garbage_payload() {
        let runtime = init();
        let dir = ::tempfile::tempdir().unwrap();
        let basepath = dir.path().join("out");

        let mut broker = FileMetaBroker::new(
            *gst::CAT_RUST,
            runtime.handle().clone(),
            basepath.to_str().unwrap(),
            FileFormat::Proto,
        );
        broker.start().unwrap();

        let mut buffer = gst::Buffer::with_size(8).unwrap();
        meta::attach(buffer.get_mut().unwrap(), Bytes::from_static(&[0xff, 0xff, 0xff])).unwrap();
        assert_eq!(
            broker.on_buffer(buffer.get_mut().unwrap()),
            Err(FlowError::Error)
        );
        broker.stop().unwrap();

        let data = std::fs::read(dir.path().join("out.pb")).unwrap();
        assert!(data.is_empty());
    }

    #[test]
    fn test_missing_directory() {
        let runtime = init();
        let dir = ::tempfile::tempdir().unwrap();
        let basepath = dir.path().join("missing").join("out");

        let mut broker = FileMetaBroker::new(
            *gst::CAT_RUST,
            runtime.handle().clone(),
            basepath.to_str().unwrap(),
            FileFormat::Csv,
        );
        assert!(broker.start().is_err());
    }
}
