use std::io::{Read, Write};

use crate::ser::{ByteFormat, SerResult};

macro_rules! impl_uint_format {
    ($t:ty, $width:expr) => {
        impl ByteFormat for $t {
            fn serialized_length(&self) -> usize {
                $width
            }

            fn read_from<R>(reader: &mut R) -> SerResult<Self>
            where
                R: Read,
            {
                let mut buf = [0u8; $width];
                reader.read_exact(&mut buf)?;
                Ok(<$t>::from_be_bytes(buf))
            }

            fn write_to<W>(&self, writer: &mut W) -> SerResult<usize>
            where
                W: Write,
            {
                writer.write_all(&self.to_be_bytes())?;
                Ok($width)
            }
        }
    };
}

impl_uint_format!(u8, 1);
impl_uint_format!(u16, 2);
impl_uint_format!(u32, 4);
impl_uint_format!(u64, 8);
