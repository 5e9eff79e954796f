//! Synthetic media files for tests. Only headers are meaningful; payloads are
//! zero-filled.
#![allow(dead_code)]

/// 1904-01-01 to 2020-01-01 in seconds, the MPEG-4 creation time epoch.
pub const MP4_CREATION_2020: u32 = 3_660_681_600;
/// 1904-01-01 to 2050-01-01, past what a version 0 header can hold.
pub const MP4_CREATION_2050: u64 = 4_607_452_800;

fn bx(kind: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(payload.len() + 8);
    out.extend_from_slice(&(payload.len() as u32 + 8).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(payload);
    out
}

fn concat(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

fn packed_language(code: &[u8; 3]) -> u16 {
    code.iter()
        .fold(0u16, |acc, &c| (acc << 5) | u16::from(c - 0x60))
}

fn ftyp(major: &[u8; 4], compatible: &[&[u8; 4]]) -> Vec<u8> {
    let mut payload = major.to_vec();
    payload.extend_from_slice(&0x200u32.to_be_bytes());
    for brand in compatible {
        payload.extend_from_slice(*brand);
    }
    bx(b"ftyp", &payload)
}

/// Version and flags, then the version-dependent time fields of a full box.
fn timed_header(version: u8, flags: u8, times: &[u64]) -> Vec<u8> {
    let mut p = vec![version, 0, 0, flags];
    for &time in times {
        if version == 1 {
            p.extend_from_slice(&time.to_be_bytes());
        } else {
            p.extend_from_slice(&(time as u32).to_be_bytes());
        }
    }
    p
}

fn mvhd(version: u8, created: u64, duration_ms: u64) -> Vec<u8> {
    let mut p = timed_header(version, 0, &[created, created]);
    p.extend_from_slice(&1000u32.to_be_bytes());
    p.extend(timed_header(version, 0, &[duration_ms]).split_off(4));
    p.extend_from_slice(&0x0001_0000u32.to_be_bytes());
    p.extend_from_slice(&0x0100u16.to_be_bytes());
    p.extend_from_slice(&[0u8; 10 + 36 + 24]);
    p.extend_from_slice(&3u32.to_be_bytes());
    bx(b"mvhd", &p)
}

fn tkhd(version: u8, track_id: u32, duration_ms: u64, width: u16, height: u16) -> Vec<u8> {
    let mut p = timed_header(version, 3, &[0, 0]);
    p.extend_from_slice(&track_id.to_be_bytes());
    p.extend_from_slice(&[0u8; 4]);
    p.extend(timed_header(version, 0, &[duration_ms]).split_off(4));
    p.extend_from_slice(&[0u8; 8 + 8 + 36]);
    p.extend_from_slice(&(u32::from(width) << 16).to_be_bytes());
    p.extend_from_slice(&(u32::from(height) << 16).to_be_bytes());
    bx(b"tkhd", &p)
}

fn mdhd(version: u8, timescale: u32, duration: u64, language: &[u8; 3]) -> Vec<u8> {
    let mut p = timed_header(version, 0, &[0, 0]);
    p.extend_from_slice(&timescale.to_be_bytes());
    p.extend(timed_header(version, 0, &[duration]).split_off(4));
    p.extend_from_slice(&packed_language(language).to_be_bytes());
    p.extend_from_slice(&[0u8; 2]);
    bx(b"mdhd", &p)
}

fn hdlr(handler: &[u8; 4]) -> Vec<u8> {
    let mut p = vec![0u8; 8];
    p.extend_from_slice(handler);
    p.extend_from_slice(&[0u8; 13]);
    bx(b"hdlr", &p)
}

fn avc1(width: u16, height: u16) -> Vec<u8> {
    let mut p = vec![0u8; 6];
    p.extend_from_slice(&1u16.to_be_bytes());
    p.extend_from_slice(&[0u8; 16]);
    p.extend_from_slice(&width.to_be_bytes());
    p.extend_from_slice(&height.to_be_bytes());
    p.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    p.extend_from_slice(&0x0048_0000u32.to_be_bytes());
    p.extend_from_slice(&[0u8; 4]);
    p.extend_from_slice(&1u16.to_be_bytes());
    p.extend_from_slice(&[0u8; 32]);
    p.extend_from_slice(&0x0018u16.to_be_bytes());
    p.extend_from_slice(&0xFFFFu16.to_be_bytes());
    bx(b"avc1", &p)
}

/// Elementary stream descriptor for AAC LC, 48 kHz stereo.
fn esds(bit_rate: u32) -> Vec<u8> {
    let mut p = vec![0u8; 4];
    p.extend_from_slice(&[0x03, 0x19, 0x00, 0x02, 0x00]);
    p.extend_from_slice(&[0x04, 0x11, 0x40, 0x15, 0x00, 0x00, 0x00]);
    p.extend_from_slice(&bit_rate.to_be_bytes());
    p.extend_from_slice(&bit_rate.to_be_bytes());
    p.extend_from_slice(&[0x05, 0x02, 0x11, 0x90]);
    p.extend_from_slice(&[0x06, 0x01, 0x02]);
    bx(b"esds", &p)
}

fn mp4a(channels: u16, sample_rate: u32) -> Vec<u8> {
    let mut p = vec![0u8; 6];
    p.extend_from_slice(&1u16.to_be_bytes());
    p.extend_from_slice(&[0u8; 8]);
    p.extend_from_slice(&channels.to_be_bytes());
    p.extend_from_slice(&16u16.to_be_bytes());
    p.extend_from_slice(&[0u8; 4]);
    p.extend_from_slice(&(sample_rate << 16).to_be_bytes());
    p.extend(esds(128_000));
    bx(b"mp4a", &p)
}

fn stbl(entry: Vec<u8>, samples: u32, delta: u32, sizes: &[u32], constant_size: u32) -> Vec<u8> {
    let mut stsd = vec![0u8; 4];
    stsd.extend_from_slice(&1u32.to_be_bytes());
    stsd.extend_from_slice(&entry);

    let mut stts = vec![0u8; 4];
    stts.extend_from_slice(&1u32.to_be_bytes());
    stts.extend_from_slice(&samples.to_be_bytes());
    stts.extend_from_slice(&delta.to_be_bytes());

    // Every sample in one chunk.
    let mut stsc = vec![0u8; 4];
    stsc.extend_from_slice(&1u32.to_be_bytes());
    stsc.extend_from_slice(&1u32.to_be_bytes());
    stsc.extend_from_slice(&samples.max(1).to_be_bytes());
    stsc.extend_from_slice(&1u32.to_be_bytes());

    let mut stsz = vec![0u8; 4];
    stsz.extend_from_slice(&constant_size.to_be_bytes());
    stsz.extend_from_slice(&samples.to_be_bytes());
    for size in sizes {
        stsz.extend_from_slice(&size.to_be_bytes());
    }

    let mut stco = vec![0u8; 4];
    stco.extend_from_slice(&1u32.to_be_bytes());
    stco.extend_from_slice(&0u32.to_be_bytes());

    bx(
        b"stbl",
        &concat(&[
            bx(b"stsd", &stsd),
            bx(b"stts", &stts),
            bx(b"stsc", &stsc),
            bx(b"stsz", &stsz),
            bx(b"stco", &stco),
        ]),
    )
}

fn trak(tkhd: Vec<u8>, mdhd: Vec<u8>, handler: &[u8; 4], stbl: Vec<u8>) -> Vec<u8> {
    let minf = bx(b"minf", &stbl);
    let mdia = bx(b"mdia", &concat(&[mdhd, hdlr(handler), minf]));
    bx(b"trak", &concat(&[tkhd, mdia]))
}

fn aac_trak(version: u8, track_id: u32, duration_ms: u32, language: &[u8; 3]) -> Vec<u8> {
    let samples = duration_ms * 48 / 1024;
    let sizes = vec![300u32; samples as usize];
    trak(
        tkhd(version, track_id, u64::from(duration_ms), 0, 0),
        mdhd(version, 48_000, u64::from(duration_ms) * 48, language),
        b"soun",
        stbl(mp4a(2, 48_000), samples, 1024, &sizes, 0),
    )
}

/// MPEG-4 file with a 640x360 25 fps AVC track and a stereo 48 kHz AAC track.
pub fn mp4_av(duration_ms: u32) -> Vec<u8> {
    let frames = duration_ms / 40;
    let video = trak(
        tkhd(0, 1, u64::from(duration_ms), 640, 360),
        mdhd(0, 12_800, u64::from(duration_ms) * 64 / 5, b"und"),
        b"vide",
        stbl(avc1(640, 360), frames, 512, &[], 1000),
    );
    let audio = aac_trak(0, 2, duration_ms, b"eng");

    concat(&[
        ftyp(b"isom", &[b"isom", b"iso2", b"avc1", b"mp41"]),
        bx(
            b"moov",
            &concat(&[mvhd(0, MP4_CREATION_2020.into(), duration_ms.into()), video, audio]),
        ),
        bx(b"mdat", &[0u8; 16]),
    ])
}

/// Audio-only M4A whose headers all use the 64-bit version 1 layout.
pub fn m4a_v1(duration_ms: u32) -> Vec<u8> {
    concat(&[
        ftyp(b"M4A ", &[b"M4A ", b"mp42", b"isom"]),
        bx(
            b"moov",
            &concat(&[
                mvhd(1, MP4_CREATION_2050, duration_ms.into()),
                aac_trak(1, 1, duration_ms, b"deu"),
            ]),
        ),
        bx(b"mdat", &[0u8; 16]),
    ])
}

/// One second of video whose sample table claims `u32::MAX` samples of
/// `u32::MAX` bytes each.
pub fn mp4_oversized_sample_table() -> Vec<u8> {
    let video = trak(
        tkhd(0, 1, 1000, 640, 360),
        mdhd(0, 1000, 1000, b"und"),
        b"vide",
        stbl(avc1(640, 360), u32::MAX, 1, &[], u32::MAX),
    );
    concat(&[
        ftyp(b"isom", &[b"isom"]),
        bx(b"moov", &concat(&[mvhd(0, 0, 1000), video])),
        bx(b"mdat", &[0u8; 16]),
    ])
}

pub fn mp4_ftyp_only() -> Vec<u8> {
    concat(&[ftyp(b"mp42", &[b"mp42", b"isom"]), bx(b"mdat", &[0u8; 16])])
}

fn riff_chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn riff_file(form: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
    let mut body = form.to_vec();
    body.extend(concat(chunks));
    let mut out = b"RIFF".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_le_bytes());
    out.extend_from_slice(&body);
    out
}

/// The 16 bytes every fmt chunk starts with. `bits` is the container width.
fn wave_format(tag: u16, channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
    let block_align = channels * bits / 8;
    let byte_rate = sample_rate * u32::from(block_align);
    let mut fmt = Vec::new();
    fmt.extend_from_slice(&tag.to_le_bytes());
    fmt.extend_from_slice(&channels.to_le_bytes());
    fmt.extend_from_slice(&sample_rate.to_le_bytes());
    fmt.extend_from_slice(&byte_rate.to_le_bytes());
    fmt.extend_from_slice(&block_align.to_le_bytes());
    fmt.extend_from_slice(&bits.to_le_bytes());
    fmt
}

fn data_len(channels: u16, sample_rate: u32, bits: u16, duration_ms: u32) -> usize {
    let byte_rate = sample_rate * u32::from(channels * bits / 8);
    (u64::from(byte_rate) * u64::from(duration_ms) / 1000) as usize
}

/// PCM Wave of `duration_ms` silence.
pub fn wav(channels: u16, sample_rate: u32, bits: u16, duration_ms: u32) -> Vec<u8> {
    riff_file(
        b"WAVE",
        &[
            riff_chunk(b"fmt ", &wave_format(1, channels, sample_rate, bits)),
            riff_chunk(b"data", &vec![0u8; data_len(channels, sample_rate, bits, duration_ms)]),
        ],
    )
}

/// Half a second of 8-bit mono Wave carrying a LIST/INFO title.
pub fn wav_with_title(sample_rate: u32, title: &str) -> Vec<u8> {
    let mut name = title.as_bytes().to_vec();
    name.push(0);
    let mut info = b"INFO".to_vec();
    info.extend(riff_chunk(b"INAM", &name));
    riff_file(
        b"WAVE",
        &[
            riff_chunk(b"fmt ", &wave_format(1, 1, sample_rate, 8)),
            riff_chunk(b"LIST", &info),
            riff_chunk(b"data", &vec![0u8; sample_rate as usize / 2]),
        ],
    )
}

/// WAVE_FORMAT_EXTENSIBLE PCM with `valid_bits` significant bits stored in
/// `container_bits` wide samples.
pub fn wav_extensible(
    channels: u16,
    sample_rate: u32,
    valid_bits: u16,
    container_bits: u16,
    duration_ms: u32,
) -> Vec<u8> {
    const SUBTYPE_PCM: [u8; 16] = [
        0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x00, 0x80, 0x00, 0x00, 0xAA, 0x00, 0x38, 0x9B,
        0x71,
    ];
    let mut fmt = wave_format(0xFFFE, channels, sample_rate, container_bits);
    fmt.extend_from_slice(&22u16.to_le_bytes());
    fmt.extend_from_slice(&valid_bits.to_le_bytes());
    fmt.extend_from_slice(&((1u32 << channels) - 1).to_le_bytes());
    fmt.extend_from_slice(&SUBTYPE_PCM);
    let len = data_len(channels, sample_rate, container_bits, duration_ms);
    riff_file(
        b"WAVE",
        &[riff_chunk(b"fmt ", &fmt), riff_chunk(b"data", &vec![0u8; len])],
    )
}

/// CRC-32 with polynomial 0x04C11DB7, no reflection, zero initial value.
fn ogg_crc(data: &[u8]) -> u32 {
    data.iter().fold(0u32, |crc, &byte| {
        (0..8).fold(crc ^ (u32::from(byte) << 24), |crc, _| {
            if crc & 0x8000_0000 != 0 {
                (crc << 1) ^ 0x04C1_1DB7
            } else {
                crc << 1
            }
        })
    })
}

const BOS: u8 = 0x02;
const EOS: u8 = 0x04;

fn ogg_page(
    header_type: u8,
    granule: u64,
    serial: u32,
    sequence: u32,
    packets: &[&[u8]],
) -> Vec<u8> {
    let mut lacing = Vec::new();
    let mut body = Vec::new();
    for packet in packets {
        lacing.extend(std::iter::repeat_n(255u8, packet.len() / 255));
        lacing.push((packet.len() % 255) as u8);
        body.extend_from_slice(packet);
    }
    let mut page = b"OggS".to_vec();
    page.push(0);
    page.push(header_type);
    page.extend_from_slice(&granule.to_le_bytes());
    page.extend_from_slice(&serial.to_le_bytes());
    page.extend_from_slice(&sequence.to_le_bytes());
    page.extend_from_slice(&[0u8; 4]);
    page.push(lacing.len() as u8);
    page.extend_from_slice(&lacing);
    page.extend_from_slice(&body);
    let crc = ogg_crc(&page);
    page[22..26].copy_from_slice(&crc.to_le_bytes());
    page
}

fn comment_block(entries: &[&str]) -> Vec<u8> {
    let vendor = b"media_inspector";
    let mut block = (vendor.len() as u32).to_le_bytes().to_vec();
    block.extend_from_slice(vendor);
    block.extend_from_slice(&(entries.len() as u32).to_le_bytes());
    for entry in entries {
        block.extend_from_slice(&(entry.len() as u32).to_le_bytes());
        block.extend_from_slice(entry.as_bytes());
    }
    block
}

/// Packs `(value, width)` pairs least significant bit first, as Vorbis
/// setup headers are coded.
fn pack_bits(fields: &[(u32, u32)]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut used = 0usize;
    for &(value, width) in fields {
        for bit in 0..width {
            if used % 8 == 0 {
                out.push(0);
            }
            if (value >> bit) & 1 == 1 {
                let last = out.len() - 1;
                out[last] |= 1 << (used % 8);
            }
            used += 1;
        }
    }
    out
}

/// Smallest valid Vorbis setup header: one codebook, floor, residue and
/// mapping, and a single short-block mode.
fn vorbis_setup() -> Vec<u8> {
    let mut setup = b"\x05vorbis".to_vec();
    setup.extend(pack_bits(&[
        // codebooks: count, sync, dimensions, entries, unordered dense lengths, no lookup
        (0, 8),
        (0x56_4342, 24),
        (1, 16),
        (1, 24),
        (0, 1),
        (0, 1),
        (0, 5),
        (0, 4),
        // time domain transforms
        (0, 6),
        (0, 16),
        // floors: one type 1 floor without partitions
        (0, 6),
        (1, 16),
        (0, 5),
        (0, 2),
        (0, 4),
        // residues: begin, end, partition size, one classification
        (0, 6),
        (0, 16),
        (0, 24),
        (0, 24),
        (0, 24),
        (0, 6),
        (0, 8),
        (0, 3),
        (0, 1),
        // mappings: type 0, one submap, no coupling
        (0, 6),
        (0, 16),
        (0, 1),
        (0, 1),
        (0, 2),
        (0, 24),
        // modes: short block, window 0, transform 0, mapping 0
        (0, 6),
        (0, 1),
        (0, 16),
        (0, 16),
        (0, 8),
        // framing
        (1, 1),
    ]));
    setup
}

/// Pages of a stereo 44.1 kHz Vorbis stream, nominal 112 kb/s, tagged
/// "Test Tone" by "Nobody". Audio packets are 128 samples each.
fn vorbis_pages(serial: u32, duration_ms: u64) -> (Vec<u8>, Vec<u8>) {
    const RATE: u64 = 44_100;
    let mut ident = b"\x01vorbis".to_vec();
    ident.extend_from_slice(&0u32.to_le_bytes());
    ident.push(2);
    ident.extend_from_slice(&(RATE as u32).to_le_bytes());
    ident.extend_from_slice(&0u32.to_le_bytes());
    ident.extend_from_slice(&112_000u32.to_le_bytes());
    ident.extend_from_slice(&0u32.to_le_bytes());
    ident.extend_from_slice(&[0xB8, 0x01]);

    let mut comment = b"\x03vorbis".to_vec();
    comment.extend(comment_block(&["TITLE=Test Tone", "ARTIST=Nobody"]));
    comment.push(1);

    let granule = (duration_ms * RATE).div_ceil(1000);
    let head = ogg_page(BOS, 0, serial, 0, &[&ident]);
    let rest = concat(&[
        ogg_page(0, 0, serial, 1, &[&comment, &vorbis_setup()]),
        ogg_page(0, 128, serial, 2, &[&[0x00], &[0x00]]),
        ogg_page(EOS, granule, serial, 3, &[&[0x00]]),
    ]);
    (head, rest)
}

/// Ogg Vorbis, stereo 44.1 kHz, nominal 112 kb/s, tagged "Test Tone" by "Nobody".
pub fn ogg_vorbis(duration_ms: u64) -> Vec<u8> {
    let (head, rest) = vorbis_pages(0x1234, duration_ms);
    concat(&[head, rest])
}

/// Ogg Opus, mono, 312 samples of pre-skip.
pub fn ogg_opus(duration_ms: u64) -> Vec<u8> {
    const SERIAL: u32 = 0x0F0F;
    const PRE_SKIP: u16 = 312;
    let mut head = b"OpusHead".to_vec();
    head.push(1);
    head.push(1);
    head.extend_from_slice(&PRE_SKIP.to_le_bytes());
    head.extend_from_slice(&48_000u32.to_le_bytes());
    head.extend_from_slice(&0u16.to_le_bytes());
    head.push(0);

    let mut tags = b"OpusTags".to_vec();
    tags.extend(comment_block(&[]));

    // TOC byte 0: one 10 ms SILK frame, 480 samples.
    let granule = u64::from(PRE_SKIP) + duration_ms * 48;
    concat(&[
        ogg_page(BOS, 0, SERIAL, 0, &[&head]),
        ogg_page(0, 0, SERIAL, 1, &[&tags]),
        ogg_page(0, 480, SERIAL, 2, &[&[0x00]]),
        ogg_page(EOS, granule, SERIAL, 3, &[&[0x00]]),
    ])
}

/// Ogg FLAC, 16-bit stereo 44.1 kHz, `samples` long, album "Live".
pub fn ogg_flac(samples: u64) -> Vec<u8> {
    const SERIAL: u32 = 0x0F1A;
    let mut ident = vec![0x7F];
    ident.extend_from_slice(b"FLAC");
    ident.extend_from_slice(&[1, 0]);
    ident.extend_from_slice(&1u16.to_be_bytes());
    ident.extend_from_slice(b"fLaC");
    ident.extend_from_slice(&[0x00, 0x00, 0x00, 34]);
    ident.extend_from_slice(&4096u16.to_be_bytes());
    ident.extend_from_slice(&4096u16.to_be_bytes());
    ident.extend_from_slice(&[0u8; 6]);
    // rate (20 bits), channels - 1 (3), bits - 1 (5), total samples (36)
    let packed = (44_100u64 << 44) | (1 << 41) | (15 << 36) | (samples & 0xF_FFFF_FFFF);
    ident.extend_from_slice(&packed.to_be_bytes());
    ident.extend_from_slice(&[0u8; 16]);

    let comments = comment_block(&["ALBUM=Live"]);
    let mut comment = vec![0x84];
    comment.extend_from_slice(&(comments.len() as u32).to_be_bytes()[1..]);
    comment.extend(comments);

    // A lone sync byte: an audio packet without a decodable frame header.
    concat(&[
        ogg_page(BOS, 0, SERIAL, 0, &[&ident]),
        ogg_page(0, 0, SERIAL, 1, &[&comment]),
        ogg_page(EOS, samples, SERIAL, 2, &[&[0xFF]]),
    ])
}

/// Ogg with a 320x240 Theora stream at 30000/1001 fps (serial 1), and
/// optionally the Vorbis stream of [`ogg_vorbis`] (serial 2).
pub fn ogg_theora(with_vorbis: bool) -> Vec<u8> {
    let mut ident = b"\x80theora".to_vec();
    ident.extend_from_slice(&[3, 2, 1]);
    ident.extend_from_slice(&20u16.to_be_bytes());
    ident.extend_from_slice(&15u16.to_be_bytes());
    ident.extend_from_slice(&320u32.to_be_bytes()[1..]);
    ident.extend_from_slice(&240u32.to_be_bytes()[1..]);
    ident.extend_from_slice(&[0, 0]);
    ident.extend_from_slice(&30_000u32.to_be_bytes());
    ident.extend_from_slice(&1001u32.to_be_bytes());
    ident.extend_from_slice(&[0, 0, 1, 0, 0, 1]);
    ident.push(0);
    ident.extend_from_slice(&[0u8; 3]);
    ident.extend_from_slice(&[0u8; 2]);

    let theora_head = ogg_page(BOS, 0, 1, 0, &[&ident]);
    let theora_data = ogg_page(EOS, 0, 1, 1, &[&[0u8; 10]]);
    if with_vorbis {
        let (vorbis_head, vorbis_rest) = vorbis_pages(2, 1000);
        concat(&[theora_head, vorbis_head, theora_data, vorbis_rest])
    } else {
        concat(&[theora_head, theora_data])
    }
}

/// `frames` MPEG-1 Layer 3 frames, 128 kb/s, 44.1 kHz stereo, 417 bytes each.
pub fn mp3_cbr(frames: usize) -> Vec<u8> {
    let mut frame = vec![0xFF, 0xFB, 0x90, 0x00];
    frame.resize(417, 0);
    frame.repeat(frames)
}

/// `frames` CBR frames led by an extra frame holding a Xing (VBR) or Info
/// (CBR) tag with frame and byte counts.
pub fn mp3_xing(frames: u32, vbr: bool) -> Vec<u8> {
    let mut first = vec![0xFF, 0xFB, 0x90, 0x00];
    first.extend_from_slice(&[0u8; 32]);
    first.extend_from_slice(if vbr { b"Xing" } else { b"Info" });
    first.extend_from_slice(&0x03u32.to_be_bytes());
    first.extend_from_slice(&frames.to_be_bytes());
    first.extend_from_slice(&((frames + 1) * 417).to_be_bytes());
    first.resize(417, 0);
    first.extend(mp3_cbr(frames as usize));
    first
}

fn latin1_field(text: &str, len: usize) -> Vec<u8> {
    let mut field = text.as_bytes().to_vec();
    field.resize(len, 0);
    field
}

/// Trailing ID3v1 tag.
pub fn id3v1_tag(title: &str, artist: &str, album: &str) -> Vec<u8> {
    let mut tag = b"TAG".to_vec();
    tag.extend(latin1_field(title, 30));
    tag.extend(latin1_field(artist, 30));
    tag.extend(latin1_field(album, 30));
    tag.extend(latin1_field("2001", 4));
    tag.extend(latin1_field("", 30));
    tag.push(255);
    tag
}

fn syncsafe(size: usize) -> [u8; 4] {
    [
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]
}

/// ID3v2.3 tag with Latin-1 title and performer frames.
pub fn id3v2_tag(title: &str, performer: &str) -> Vec<u8> {
    let mut frames = Vec::new();
    for (id, text) in [(b"TIT2", title), (b"TPE1", performer)] {
        frames.extend_from_slice(id);
        frames.extend_from_slice(&(text.len() as u32 + 1).to_be_bytes());
        frames.extend_from_slice(&[0, 0, 0]);
        frames.extend_from_slice(text.as_bytes());
    }
    let mut tag = b"ID3\x03\x00\x00".to_vec();
    tag.extend_from_slice(&syncsafe(frames.len()));
    tag.extend(frames);
    tag
}

/// 8-bit RGBA PNG header followed by IEND. Chunk CRCs are zero.
pub fn png(width: u32, height: u32) -> Vec<u8> {
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 6, 0, 0, 0]);

    let mut out = b"\x89PNG\r\n\x1a\n".to_vec();
    out.extend_from_slice(&(ihdr.len() as u32).to_be_bytes());
    out.extend_from_slice(b"IHDR");
    out.extend_from_slice(&ihdr);
    out.extend_from_slice(&[0u8; 4]);
    out.extend_from_slice(&0u32.to_be_bytes());
    out.extend_from_slice(b"IEND");
    out.extend_from_slice(&[0u8; 4]);
    out
}
