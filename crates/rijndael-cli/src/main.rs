//! Command-line interface for `rijndael-core`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rijndael_core::{
    add_round_key, block_from_slice, decrypt_block, encrypt_block, expand_decryption_key,
    expand_key, mix_columns, shift_rows, sub_bytes, Block, KeySize, Rijndael, BLOCK_LEN,
};

/// Rijndael block cipher CLI.
#[derive(Parser)]
#[command(name = "rijndael", version, author, about = "Rijndael block cipher CLI")]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the round keys derived from a master key.
    Expand {
        /// Master key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX", env = "RIJNDAEL_KEY_HEX")]
        key_hex: String,
        /// Print the reversed schedule used for decryption.
        #[arg(long, default_value_t = false)]
        decrypt: bool,
    },
    /// Encrypt every 16-byte block of a file independently.
    Enc {
        /// Master key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX", env = "RIJNDAEL_KEY_HEX")]
        key_hex: String,
        /// Input file (must be a multiple of 16 bytes).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output ciphertext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Decrypt every 16-byte block of a file independently.
    Dec {
        /// Master key as 32, 48 or 64 hex characters.
        #[arg(long, value_name = "HEX", env = "RIJNDAEL_KEY_HEX")]
        key_hex: String,
        /// Input file (ciphertext).
        #[arg(long, value_name = "FILE")]
        input: PathBuf,
        /// Output plaintext path.
        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Check that decryption undoes encryption on random blocks.
    Check {
        /// Master key; a random key of `--key-bits` is drawn when omitted.
        #[arg(long, value_name = "HEX", env = "RIJNDAEL_KEY_HEX")]
        key_hex: Option<String>,
        /// Size of the random key.
        #[arg(long, value_enum, default_value_t = KeyBits::B128)]
        key_bits: KeyBits,
        /// Number of random samples to test.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Encrypt and decrypt sixteen 0xff bytes under an all-0xff key.
    Demo {
        /// Size of the all-0xff key.
        #[arg(long, value_enum, default_value_t = KeyBits::B128)]
        key_bits: KeyBits,
        /// How to print the 4x4 grids.
        #[arg(long, value_enum, default_value_t = GridFormat::Binary)]
        format: GridFormat,
    },
    /// Run the first round by hand: mix key 0, substitute, shift, mix columns, mix key 1.
    RoundOne {
        /// Master key; defaults to sixteen 0xff bytes.
        #[arg(long, value_name = "HEX")]
        key_hex: Option<String>,
        /// Input block; defaults to sixteen 0xff bytes.
        #[arg(long, value_name = "HEX")]
        block_hex: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum KeyBits {
    #[value(name = "128")]
    B128,
    #[value(name = "192")]
    B192,
    #[value(name = "256")]
    B256,
}

impl KeyBits {
    fn key_size(self) -> KeySize {
        match self {
            Self::B128 => KeySize::Aes128,
            Self::B192 => KeySize::Aes192,
            Self::B256 => KeySize::Aes256,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum GridFormat {
    Hex,
    Binary,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::builder()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Expand { key_hex, decrypt } => cmd_expand(&key_hex, decrypt),
        Commands::Enc {
            key_hex,
            input,
            output,
        } => cmd_enc(&key_hex, &input, &output),
        Commands::Dec {
            key_hex,
            input,
            output,
        } => cmd_dec(&key_hex, &input, &output),
        Commands::Check {
            key_hex,
            key_bits,
            samples,
            seed,
        } => cmd_check(key_hex.as_deref(), key_bits, samples, seed),
        Commands::Demo { key_bits, format } => cmd_demo(key_bits, format),
        Commands::RoundOne { key_hex, block_hex } => {
            cmd_round_one(key_hex.as_deref(), block_hex.as_deref())
        }
    }
}

fn cmd_expand(key_hex: &str, decrypt: bool) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let round_keys = if decrypt {
        expand_decryption_key(&key)?
    } else {
        expand_key(&key)?
    };
    for (index, round_key) in round_keys.iter().enumerate() {
        println!("{index:>2}: {}", hex::encode(round_key.as_bytes()));
    }
    Ok(())
}

fn cmd_enc(key_hex: &str, input_path: &PathBuf, output_path: &PathBuf) -> Result<()> {
    let cipher = Rijndael::new(&parse_key_hex(key_hex)?)?;
    let mut data =
        fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let blocks = process_blocks(&mut data, |block| cipher.encrypt_block(block))?;
    fs::write(output_path, data).with_context(|| format!("write {}", output_path.display()))?;
    log::info!("encrypted {blocks} blocks into {}", output_path.display());
    Ok(())
}

fn cmd_dec(key_hex: &str, input_path: &PathBuf, output_path: &PathBuf) -> Result<()> {
    let cipher = Rijndael::new(&parse_key_hex(key_hex)?)?;
    let mut data =
        fs::read(input_path).with_context(|| format!("read {}", input_path.display()))?;
    let blocks = process_blocks(&mut data, |block| cipher.decrypt_block(block))?;
    fs::write(output_path, data).with_context(|| format!("write {}", output_path.display()))?;
    log::info!("decrypted {blocks} blocks into {}", output_path.display());
    Ok(())
}

fn cmd_check(
    key_hex: Option<&str>,
    key_bits: KeyBits,
    samples: usize,
    seed: Option<u64>,
) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let key = match key_hex {
        Some(hex_str) => parse_key_hex(hex_str)?,
        None => {
            let mut key = vec![0u8; key_bits.key_size().key_len()];
            rng.fill_bytes(&mut key);
            key
        }
    };
    check_round_trips(&key, samples, &mut rng)?;
    log::info!("{samples} samples round-tripped under a {}-byte key", key.len());
    println!("ok");
    Ok(())
}

fn check_round_trips(key: &[u8], samples: usize, rng: &mut impl RngCore) -> Result<()> {
    let cipher = Rijndael::new(key)?;
    for sample in 0..samples {
        let mut block = [0u8; BLOCK_LEN];
        rng.fill_bytes(&mut block);
        let ciphertext = cipher.encrypt_block(&block);
        if encrypt_block(&block, key)? != ciphertext {
            bail!("cached and per-call encryption disagree on sample {sample}");
        }
        if cipher.decrypt_block(&ciphertext) != block {
            bail!("round trip failed on sample {sample}");
        }
        log::debug!(
            "sample {sample}: {} -> {}",
            hex::encode(block),
            hex::encode(ciphertext)
        );
    }
    Ok(())
}

fn cmd_demo(key_bits: KeyBits, format: GridFormat) -> Result<()> {
    let key = vec![0xffu8; key_bits.key_size().key_len()];
    let plaintext = [0xffu8; BLOCK_LEN];

    let ciphertext = encrypt_block(&plaintext, &key)?;
    let recovered = decrypt_block(&ciphertext, &key)?;

    println!("Encrypted message:");
    println!("{}", format_grid(&ciphertext, format));
    println!();
    println!("Decrypted message:");
    println!("{}", format_grid(&recovered, format));
    if recovered != plaintext {
        bail!("demo round trip failed");
    }
    Ok(())
}

fn cmd_round_one(key_hex: Option<&str>, block_hex: Option<&str>) -> Result<()> {
    let key = match key_hex {
        Some(hex_str) => parse_key_hex(hex_str)?,
        None => vec![0xffu8; 16],
    };
    let block = match block_hex {
        Some(hex_str) => parse_block_hex(hex_str)?,
        None => [0xffu8; BLOCK_LEN],
    };
    let state = first_round(&block, &key)?;
    println!("{}", format_grid(&state, GridFormat::Hex));
    println!();
    println!("{}", format_grid(&state, GridFormat::Binary));
    Ok(())
}

fn first_round(block: &Block, key: &[u8]) -> Result<Block> {
    let round_keys = expand_key(key)?;
    let mut state = *block;
    add_round_key(&mut state, round_keys.get(0).as_bytes());
    sub_bytes(&mut state);
    shift_rows(&mut state);
    mix_columns(&mut state);
    add_round_key(&mut state, round_keys.get(1).as_bytes());
    Ok(state)
}

/// Applies `transform` to each 16-byte block of `data` in place and returns the block count.
fn process_blocks(data: &mut [u8], transform: impl Fn(&Block) -> Block) -> Result<usize> {
    if data.len() % BLOCK_LEN != 0 {
        bail!("input length must be a multiple of {BLOCK_LEN} bytes");
    }
    for chunk in data.chunks_exact_mut(BLOCK_LEN) {
        let block = block_from_slice(chunk)?;
        chunk.copy_from_slice(&transform(&block));
    }
    Ok(data.len() / BLOCK_LEN)
}

/// Four rows of four consecutive bytes.
fn format_grid(block: &Block, format: GridFormat) -> String {
    block
        .chunks_exact(4)
        .map(|row| {
            row.iter()
                .map(|byte| match format {
                    GridFormat::Hex => format!("{byte:02x}"),
                    GridFormat::Binary => format!("{byte:08b}"),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_key_hex(hex_str: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    KeySize::from_len(bytes.len())?;
    Ok(bytes)
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    Ok(block_from_slice(&bytes)?)
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rijndael_core::CipherError;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_key_hex_accepts_supported_sizes() {
        for len in [16usize, 24, 32] {
            let key = parse_key_hex(&"ab".repeat(len)).expect("valid key");
            assert_eq!(key.len(), len);
        }
        assert_eq!(parse_key_hex(" 00112233445566778899aabbccddeeff\n").unwrap()[15], 0xff);
    }

    #[test]
    fn parse_key_hex_rejects_bad_input() {
        let err = parse_key_hex(&"00".repeat(17)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CipherError>(),
            Some(&CipherError::KeyLength { len: 17 })
        );
        assert!(parse_key_hex("zz").is_err());
    }

    #[test]
    fn parse_block_hex_requires_sixteen_bytes() {
        assert_eq!(parse_block_hex(&"ff".repeat(16)).unwrap(), [0xff; 16]);
        let err = parse_block_hex(&"ff".repeat(8)).unwrap_err();
        assert_eq!(
            err.downcast_ref::<CipherError>(),
            Some(&CipherError::BlockLength { len: 8 })
        );
    }

    #[test]
    fn process_blocks_round_trip() {
        let cipher = Rijndael::new(&[0x11; 24]).unwrap();
        let original: Vec<u8> = (0u8..64).collect();
        let mut data = original.clone();
        let count = process_blocks(&mut data, |b| cipher.encrypt_block(b)).unwrap();
        assert_eq!(count, 4);
        assert_ne!(data, original);
        process_blocks(&mut data, |b| cipher.decrypt_block(b)).unwrap();
        assert_eq!(data, original);
    }

    #[test]
    fn process_blocks_rejects_partial_block() {
        let mut data = vec![0u8; 20];
        assert!(process_blocks(&mut data, |b| *b).is_err());
        assert_eq!(data, vec![0u8; 20]);
    }

    #[test]
    fn grid_formats() {
        let block: Block = core::array::from_fn(|i| i as u8);
        assert_eq!(
            format_grid(&block, GridFormat::Hex),
            "00 01 02 03\n04 05 06 07\n08 09 0a 0b\n0c 0d 0e 0f"
        );
        let binary = format_grid(&[0xff; 16], GridFormat::Binary);
        assert_eq!(binary.lines().count(), 4);
        assert_eq!(
            binary.lines().next(),
            Some("11111111 11111111 11111111 11111111")
        );
    }

    #[test]
    fn check_passes_for_every_key_size() {
        let mut rng = seeded_rng(Some(7));
        for bits in [KeyBits::B128, KeyBits::B192, KeyBits::B256] {
            let key = vec![0x3cu8; bits.key_size().key_len()];
            check_round_trips(&key, 16, &mut rng).expect("round trips");
        }
    }

    #[test]
    fn demo_succeeds() {
        for bits in [KeyBits::B128, KeyBits::B192, KeyBits::B256] {
            cmd_demo(bits, GridFormat::Hex).expect("demo");
        }
    }

    #[test]
    fn first_round_differs_from_input() {
        let state = first_round(&[0xff; 16], &[0xff; 16]).unwrap();
        assert_ne!(state, [0xff; 16]);
        assert!(first_round(&[0xff; 16], &[0xff; 10]).is_err());
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        assert_eq!(a.next_u64(), b.next_u64());
    }
}
