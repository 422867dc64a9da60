// File purpose: strings and such are unreadable for dyld extracted binaries due to file offset issues
use crate::macho::sections::ParsedSection;
use crate::macho::segments::ParsedSegment;

/*
VM Buffer in memory:
┌───────────────────────────────────────────┐
│           Our allocated buffer            │
└───────────────────────────────────────────┘
/\                                          /\
base_vmaddr                                 base_vmaddr + buffer.len()
0x100000000                                 0x100010000

Section:
      ┌──────────┐
      │ __cstring│
      └──────────┘
      /\         /\
      section.addr = 0x100004000
      section.size = 0x100

Calculation:
start = 0x100004000 - 0x100000000 = 0x4000
end   = 0x4000 + 0x100 = 0x4100

Access buffer:
buffer[0x4000..0x4100]
*/

pub struct MachOMemoryImage {
    buffer: Vec<u8>,
    base_vmaddr: u64,
}

impl MachOMemoryImage {
    pub fn new(segments: &[ParsedSegment], file_data: &[u8], slice_offset: u64) -> Self {
        // Find the address range we need
        let mut min_addr = u64::MAX; // Start with the largest possible value
        let mut max_addr = 0u64; // Start with the smallest possible value

        for seg in segments {
            if seg.vmsize > 0 {
                min_addr = min_addr.min(seg.vmaddr);
                max_addr = max_addr.max(seg.vmaddr + seg.vmsize);
            }
        }

        if min_addr > max_addr {
            // No segments with a vmsize; nothing to reconstruct.
            return Self { buffer: Vec::new(), base_vmaddr: 0 };
        }

        let total_size = (max_addr - min_addr) as usize;
        let mut buffer = vec![0u8; total_size];

        // Copy each segment into its VM position
        for seg in segments {
            if seg.filesize == 0 {
                continue; // Skip zero-fill segments
            }

            let vm_offset = (seg.vmaddr - min_addr) as usize;
            let file_start = slice_offset as usize + seg.fileoff as usize;
            let file_end = file_start + seg.filesize as usize;

            if file_end <= file_data.len() {
                let vm_end = vm_offset + seg.filesize as usize;
                buffer[vm_offset..vm_end].copy_from_slice(&file_data[file_start..file_end]);
            }
        }

        Self { buffer, base_vmaddr: min_addr }
    }

    pub fn read_section(&self, section: &ParsedSection) -> Option<&[u8]> {
        if section.size == 0 {
            return None;
        }
        // using saturating sub as safe subtraction to prevent panic / underflow
        let start = (section.addr.saturating_sub(self.base_vmaddr)) as usize;
        let end = start + section.size as usize;

        if end <= self.buffer.len() {
            Some(&self.buffer[start..end]) // Return slice of buffer
        } else {
            None // Section doesn't fit in buffer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::macho::load_commands::LoadCommand;
    use crate::macho::sections::SectionKind;

    fn seg(vmaddr: u64, vmsize: u64, fileoff: u64, filesize: u64) -> ParsedSegment {
        ParsedSegment {
            segname: *b"__TEXT\0\0\0\0\0\0\0\0\0\0",
            vmaddr,
            vmsize,
            fileoff,
            filesize,
            maxprot: 7,
            initprot: 5,
            flags: 0,
            sections: Vec::new(),
            source_lc: LoadCommand { cmd: 0, cmdsize: 0, offset: 0 },
        }
    }

    #[test]
    fn reconstructs_section_bytes_from_file_offset() {
        let mut file_data = vec![0u8; 0x100];
        file_data[0x10..0x14].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);

        let segments = vec![seg(0x1000, 0x100, 0, 0x100)];
        let image = MachOMemoryImage::new(&segments, &file_data, 0);

        let section = ParsedSection {
            sectname: *b"__cstring\0\0\0\0\0\0\0",
            segname: *b"__TEXT\0\0\0\0\0\0\0\0\0\0",
            addr: 0x1010,
            size: 4,
            offset: 0x10,
            flags: 0,
            kind: SectionKind::CString,
        };

        let bytes = image.read_section(&section).unwrap();
        assert_eq!(bytes, &[0xDE, 0xAD, 0xBE, 0xEF]);
    }
}
