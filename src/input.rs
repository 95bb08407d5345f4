use crate::error::{SortContext, SortError, SortResult};
use memchr::memchr_iter;
use memmap2::Mmap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// The whole input, either memory-mapped or read into memory.
///
/// Lines handed out by [`InputBuffer::lines`] borrow from this buffer, so it
/// must outlive the sort.
pub enum InputBuffer {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl InputBuffer {
    /// Open `path`, treating `None` and `-` as stdin
    pub fn open(path: Option<&str>) -> SortResult<Self> {
        match path {
            None | Some("-") => {
                let buffer = read_all(io::stdin().lock())
                    .with_context(|| "standard input".to_string())?;
                Ok(InputBuffer::Owned(buffer))
            }
            Some(file) => Self::from_file(Path::new(file)),
        }
    }

    /// Map a regular file; other file types are read into memory
    pub fn from_file(path: &Path) -> SortResult<Self> {
        let name = path.display().to_string();
        let file = File::open(path).with_file_context(&name)?;
        let metadata = file.metadata().with_file_context(&name)?;

        if metadata.is_dir() {
            return Err(SortError::is_directory(&name));
        }

        if !metadata.is_file() || metadata.len() == 0 {
            let buffer = read_all(file).with_context(|| name.clone())?;
            return Ok(InputBuffer::Owned(buffer));
        }

        // SAFETY: the mapping is read-only and lives as long as every line
        // borrowed from it. Concurrent truncation of the file by another
        // process is outside what this tool guards against.
        let mmap = unsafe { Mmap::map(&file) }.with_file_context(&name)?;
        Ok(InputBuffer::Mapped(mmap))
    }

    /// Read everything from `reader`
    pub fn from_reader<R: Read>(reader: R) -> SortResult<Self> {
        Ok(InputBuffer::Owned(read_all(reader)?))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            InputBuffer::Mapped(mmap) => &mmap[..],
            InputBuffer::Owned(buffer) => buffer.as_slice(),
        }
    }

    /// Split the buffer into lines
    pub fn lines(&self) -> Vec<&[u8]> {
        split_lines(self.as_bytes())
    }
}

fn read_all<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;
    Ok(buffer)
}

/// Split on `\n`, dropping a `\r` right before it. A final line without a
/// terminator is kept; a trailing terminator does not produce an empty line.
pub fn split_lines(data: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut start = 0;

    for end in memchr_iter(b'\n', data) {
        lines.push(strip_cr(&data[start..end]));
        start = end + 1;
    }

    if start < data.len() {
        lines.push(strip_cr(&data[start..]));
    }

    lines
}

#[inline]
fn strip_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
