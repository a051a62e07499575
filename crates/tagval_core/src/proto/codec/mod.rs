use crate::proto::{ByteStream, DecodeOptions, Node, ProtoError, Registry, Result, StreamConfig};

/// Encode `node` into a fresh buffer.
pub fn encode(node: &Node, config: StreamConfig) -> Result<Vec<u8>> {
	let mut stream = ByteStream::new(config);
	node.write(&mut stream)?;
	Ok(stream.into_inner())
}

/// Decode exactly one root node from `bytes` with default limits.
pub fn decode(bytes: &[u8], config: StreamConfig) -> Result<Node> {
	decode_with(bytes, config, &DecodeOptions::default())
}

/// Decode exactly one root node from `bytes`.
///
/// Bytes left over after the root value are an error.
pub fn decode_with(bytes: &[u8], config: StreamConfig, options: &DecodeOptions) -> Result<Node> {
	let mut stream = ByteStream::from_bytes(bytes, config);
	let node = Registry::global().decoder(options.clone()).decode(&mut stream)?;
	if stream.remaining() > 0 {
		return Err(ProtoError::TrailingBytes { count: stream.remaining() });
	}
	Ok(node)
}
