use std::io::ErrorKind::UnexpectedEof;
use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::ParserError;
use crate::common::types::BinaryChunk;

pub(crate) trait Parseable<T> {
    fn parse<R: Read>(rdr: &mut R) -> Result<T, ParserError>;
}

impl Parseable<BinaryChunk> for BinaryChunk {
    fn parse<R: Read>(rdr: &mut R) -> Result<BinaryChunk, ParserError> {
        // length first, then the type. The length excludes the 8 byte chunk header.
        let length = rdr.read_u32::<LittleEndian>()?;
        let chunk_type = rdr.read_u32::<LittleEndian>()?;

        if length % 4 != 0 {
            return Err(ParserError::FormatError {
                reason: "Chunk length is not 4-byte aligned",
            });
        }

        let mut data = vec![0; length as usize];
        rdr.read_exact(&mut data)?;

        Ok(BinaryChunk { chunk_type, data })
    }
}

/// Reads chunks until the end of the input. A chunk that is cut off is an error, running out of
/// input right at a chunk boundary is not.
pub(crate) fn read_chunk_array<T: Parseable<T>, R: Read>(rdr: &mut R) -> Result<Vec<T>, ParserError> {
    let mut list = Vec::<T>::new();
    loop {
        let mut first_byte = [0u8; 1];
        match rdr.read(&mut first_byte) {
            Ok(0) => break,
            Ok(_) => {
                let mut chained = std::io::Read::chain(&first_byte[..], &mut *rdr);
                list.push(T::parse(&mut chained)?);
            }
            Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(list)
}

pub(crate) fn is_eof(err: &ParserError) -> bool {
    matches!(err, ParserError::IOError(internal) if internal.kind() == UnexpectedEof)
}
