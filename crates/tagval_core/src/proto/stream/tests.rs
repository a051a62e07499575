use crate::proto::{ByteStream, Endianness, LenPrefix, ProtoError, ReadStream, StreamConfig, TypeTag, WriteStream};

#[test]
fn writes_little_endian_by_default() {
	let mut stream = ByteStream::new(StreamConfig::default());
	stream.write_u32(0x1122_3344).expect("write u32");
	stream.write_i32(-2).expect("write i32");
	assert_eq!(stream.as_bytes(), &[0x44, 0x33, 0x22, 0x11, 0xFE, 0xFF, 0xFF, 0xFF]);
}

#[test]
fn big_endian_scalars_read_back() {
	let config = StreamConfig {
		endianness: Endianness::Big,
		string_len: LenPrefix::U32,
	};
	let mut stream = ByteStream::new(config);
	stream.write_u64(0x0102_0304_0506_0708).expect("write u64");
	stream.write_f64(-0.25).expect("write f64");
	stream.write_str("abc").expect("write str");
	assert_eq!(&stream.as_bytes()[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
	assert_eq!(&stream.as_bytes()[16..20], &[0, 0, 0, 3]);

	assert_eq!(stream.read_u64().expect("read u64"), 0x0102_0304_0506_0708);
	assert_eq!(stream.read_f64().expect("read f64"), -0.25);
	assert_eq!(stream.read_string().expect("read string"), "abc");
	assert_eq!(stream.remaining(), 0);
}

#[test]
fn u16_prefix_rejects_long_strings() {
	let mut stream = ByteStream::new(StreamConfig::default());
	let long = "x".repeat(usize::from(u16::MAX) + 1);
	let err = stream.write_str(&long).expect_err("string too long for u16 prefix");
	assert!(matches!(err, ProtoError::LengthOverflow { width: 2, .. }));
	assert!(stream.as_bytes().is_empty());
}

#[test]
fn short_read_reports_offset_and_remaining() {
	let mut stream = ByteStream::from_bytes(vec![1_u8, 2, 3], StreamConfig::default());
	assert_eq!(stream.read_u8().expect("read u8"), 1);
	let err = stream.read_u32().expect_err("only two bytes left");
	assert!(matches!(err, ProtoError::UnexpectedEof { at: 1, need: 4, rem: 2 }));
}

#[test]
fn string_length_past_end_is_eof() {
	let mut stream = ByteStream::from_bytes(vec![10_u8, 0, b'a', b'b'], StreamConfig::default());
	let err = stream.read_string().expect_err("prefix claims ten bytes");
	assert!(matches!(err, ProtoError::UnexpectedEof { at: 2, need: 10, rem: 2 }));
}

#[test]
fn invalid_utf8_is_rejected() {
	let mut stream = ByteStream::from_bytes(vec![2_u8, 0, 0xC3, 0x28], StreamConfig::default());
	let err = stream.read_string().expect_err("not utf-8");
	assert!(matches!(err, ProtoError::InvalidUtf8 { at: 2 }));
}

#[test]
fn tags_round_trip_and_unknown_bytes_fail() {
	let mut stream = ByteStream::new(StreamConfig::default());
	stream.write_tag(TypeTag::Blob).expect("write tag");
	stream.write_u8(42).expect("write raw byte");
	assert_eq!(stream.read_tag().expect("read tag"), TypeTag::Blob);
	let err = stream.read_tag().expect_err("42 is not a tag");
	assert!(matches!(err, ProtoError::UnknownTag { tag: 42 }));
}

#[test]
fn raw_bytes_round_trip() {
	let mut stream = ByteStream::new(StreamConfig::default());
	stream.write_bytes(&[9, 8, 7]).expect("write bytes");
	assert_eq!(stream.remaining_hint(), Some(3));
	let mut out = [0_u8; 2];
	stream.read_into(&mut out).expect("read two");
	assert_eq!(out, [9, 8]);
	assert_eq!(stream.read_bytes(1).expect("read one"), vec![7]);
	assert_eq!(stream.position(), 3);
}
