/*!
Reading and writing the chunked binary blobs walk meshes are stored in.

A blob is a flat sequence of chunks. Each chunk is a four byte tag, a little
endian `u32` payload length in bytes, and the payload. Payloads are arrays of
fixed size records, so the length must be a whole number of records.
*/

use std::io::{ErrorKind, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::Error;

pub const VERTEX_TAG: [u8; 4] = *b"vtx0";
pub const TRIANGLE_TAG: [u8; 4] = *b"tri0";
pub const NORMAL_TAG: [u8; 4] = *b"nom0";

/// Size in bytes of one 3d point or one index triple.
const RECORD_SIZE: usize = 12;

#[derive(Debug, Clone)]
pub struct Chunk {
    pub tag: [u8; 4],
    pub data: Vec<u8>,
}

/// Read all chunks until the end of the stream.
pub fn read_chunks<R: Read>(reader: &mut R) -> Result<Vec<Chunk>, Error> {
    let mut chunks = Vec::new();
    loop {
        let mut tag = [0u8; 4];
        // A clean end of stream can only happen at a chunk boundary.
        match reader.read(&mut tag[..1]) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
        reader
            .read_exact(&mut tag[1..])
            .map_err(|e| truncated(e, tag))?;
        let len = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| truncated(e, tag))? as usize;
        // Grows with what is actually read, not with the declared length.
        let mut data = Vec::new();
        if reader.by_ref().take(len as u64).read_to_end(&mut data)? != len {
            return Err(Error::TruncatedChunk(tag));
        }
        if chunks.iter().any(|c: &Chunk| c.tag == tag) {
            return Err(Error::DuplicateChunk(tag));
        }
        chunks.push(Chunk { tag, data });
    }
    Ok(chunks)
}

fn truncated(e: std::io::Error, tag: [u8; 4]) -> Error {
    match e.kind() {
        ErrorKind::UnexpectedEof => Error::TruncatedChunk(tag),
        _ => Error::Io(e),
    }
}

fn find_chunk<'a>(chunks: &'a [Chunk], tag: [u8; 4]) -> Result<&'a [u8], Error> {
    let chunk = chunks
        .iter()
        .find(|c| c.tag == tag)
        .ok_or(Error::MissingChunk(tag))?;
    if chunk.data.len() % RECORD_SIZE != 0 {
        return Err(Error::InvalidChunkLength(tag, chunk.data.len()));
    }
    Ok(&chunk.data)
}

/// Decode the chunk with the given tag as an array of 3d points.
pub fn points(chunks: &[Chunk], tag: [u8; 4]) -> Result<Vec<glam::Vec3>, Error> {
    let mut data = find_chunk(chunks, tag)?;
    let mut out = Vec::with_capacity(data.len() / RECORD_SIZE);
    while !data.is_empty() {
        let x = data.read_f32::<LittleEndian>()?;
        let y = data.read_f32::<LittleEndian>()?;
        let z = data.read_f32::<LittleEndian>()?;
        out.push(glam::vec3(x, y, z));
    }
    Ok(out)
}

/// Decode the chunk with the given tag as an array of index triples.
pub fn triples(chunks: &[Chunk], tag: [u8; 4]) -> Result<Vec<[u32; 3]>, Error> {
    let mut data = find_chunk(chunks, tag)?;
    let mut out = Vec::with_capacity(data.len() / RECORD_SIZE);
    while !data.is_empty() {
        out.push([
            data.read_u32::<LittleEndian>()?,
            data.read_u32::<LittleEndian>()?,
            data.read_u32::<LittleEndian>()?,
        ]);
    }
    Ok(out)
}

fn write_header<W: Write>(writer: &mut W, tag: [u8; 4], count: usize) -> Result<(), Error> {
    let len = u32::try_from(count * RECORD_SIZE).map_err(|_| {
        Error::Io(std::io::Error::new(
            ErrorKind::InvalidInput,
            "chunk is too large",
        ))
    })?;
    writer.write_all(&tag)?;
    writer.write_u32::<LittleEndian>(len)?;
    Ok(())
}

pub fn write_points<W: Write>(
    writer: &mut W,
    tag: [u8; 4],
    points: &[glam::Vec3],
) -> Result<(), Error> {
    write_header(writer, tag, points.len())?;
    for p in points {
        writer.write_f32::<LittleEndian>(p.x)?;
        writer.write_f32::<LittleEndian>(p.y)?;
        writer.write_f32::<LittleEndian>(p.z)?;
    }
    Ok(())
}

pub fn write_triples<W: Write>(
    writer: &mut W,
    tag: [u8; 4],
    triples: &[[u32; 3]],
) -> Result<(), Error> {
    write_header(writer, tag, triples.len())?;
    for t in triples {
        for i in t {
            writer.write_u32::<LittleEndian>(*i)?;
        }
    }
    Ok(())
}
