use std::error::Error;
use std::str::FromStr;
use std::time::Instant;

use mdlayout::prelude::*;
use mdlayout::{AllDynamic, Dims, Extents, LayoutRight, Rank};
use rayon::prelude::*;

mod env;
mod index_list;

use env::env_flag;
use index_list::{parse_index_list, IndexList};

/// Integer type used for extents, indices and offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
enum IndexKind {
    U8,
    U16,
    U32,
    U64,
    Usize,
    I32,
    I64,
}

impl FromStr for IndexKind {
    type Err = String;

    fn from_str(s: &str) -> Result<IndexKind, String> {
        let kind = match s {
            "u8" => IndexKind::U8,
            "u16" => IndexKind::U16,
            "u32" => IndexKind::U32,
            "u64" => IndexKind::U64,
            "usize" => IndexKind::Usize,
            "i32" => IndexKind::I32,
            "i64" => IndexKind::I64,
            _ => {
                return Err(format!(
                    "unsupported index type \"{}\". Expected one of u8, u16, u32, u64, usize, i32, i64.",
                    s
                ))
            }
        };
        Ok(kind)
    }
}

struct Args {
    /// Size of each dimension.
    extents: IndexList,

    /// Integer type for sizes, indices and offsets.
    index_type: IndexKind,

    /// Indices whose offsets should be printed.
    indices: Vec<IndexList>,

    /// Number of random indices to map.
    sample: usize,

    /// Seed for random index generation.
    seed: Option<u64>,

    /// Verify that offsets of all indices are in row-major order.
    check: bool,

    /// Print per-dimension details.
    verbose: bool,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    use lexopt::prelude::*;

    let mut extents = IndexList::new();
    let mut index_type = IndexKind::Usize;
    let mut indices = Vec::new();
    let mut sample = 0;
    let mut seed = None;
    let mut check = false;
    let mut verbose = env_flag("MDLAYOUT_VERBOSE", false);

    let mut parser = lexopt::Parser::from_env();
    while let Some(arg) = parser.next()? {
        match arg {
            Value(val) => {
                let val = val.string()?;
                let size: i128 = val
                    .parse()
                    .map_err(|_| format!("invalid extent \"{}\". Must be an integer.", val))?;
                extents.push(size);
            }
            Short('t') | Long("index-type") => {
                index_type = parser.value()?.string()?.parse()?;
            }
            Short('i') | Long("index") => {
                indices.push(parse_index_list(&parser.value()?.string()?)?);
            }
            Short('s') | Long("sample") => {
                sample = parser.value()?.parse()?;
            }
            Long("seed") => {
                seed = Some(parser.value()?.parse()?);
            }
            Short('c') | Long("check") => check = true,
            Short('v') | Long("verbose") => verbose = true,
            Short('h') | Long("help") => {
                println!(
                    "Inspect row-major layout mappings.

Usage: {bin_name} [OPTIONS] <extent>...

Each <extent> is the size of one dimension. Between 0 and 8 extents may be
given.

Options:
  -t, --index-type <type>  Index type: u8, u16, u32, u64, usize, i32 or i64
                           [default: usize]
  -i, --index <i,j,..>     Print the offset of an index. May be repeated.
  -s, --sample <n>         Print the offsets of n random indices
      --seed <n>           Seed for --sample
  -c, --check              Check that offsets are in row-major order
  -v, --verbose            Print per-dimension details to stderr.
                           Also enabled by MDLAYOUT_VERBOSE=1.
  -h, --help               Print help
",
                    bin_name = parser.bin_name().unwrap_or("mdlayout")
                );
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(Args {
        extents,
        index_type,
        indices,
        sample,
        seed,
        check,
        verbose,
    })
}

/// Convert a list of values parsed from the command line to index type `I`.
fn convert_list<I: IndexType>(values: &[i128], what: &str) -> Result<Vec<I>, String> {
    values
        .iter()
        .map(|&value| {
            I::from_i128(value).ok_or_else(|| {
                format!("{} value {} is not representable as {}", what, value, I::NAME)
            })
        })
        .collect()
}

/// Build the mapping for the extents in `args` and report on it.
fn describe<I: IndexType, D: Dims>(args: &Args) -> Result<(), Box<dyn Error>> {
    let shape = convert_list::<I>(&args.extents, "extent")?;
    let extents = Extents::<I, D>::try_from_shape(&shape)?;
    let mapping = LayoutRight::try_new(extents)?;
    let span = mapping.required_span_size();

    println!("extents: {:?}", extents.shape().as_ref());
    println!("index type: {}", I::NAME);
    println!("rank: {}", D::RANK);
    println!("required span size: {}", span);
    println!("strides: {:?}", mapping.strides().as_ref());

    if args.verbose {
        let strides = mapping.strides();
        for (dim, stride) in strides.as_ref().iter().enumerate() {
            eprintln!("dim {}: extent {} stride {}", dim, extents.extent(dim), stride);
        }
        eprintln!(
            "unique: {} exhaustive: {} strided: {}",
            mapping.is_unique(),
            mapping.is_exhaustive(),
            mapping.is_strided()
        );
    }

    for index in &args.indices {
        if index.len() != D::RANK {
            return Err(format!(
                "index {:?} has {} values but the rank is {}",
                index.as_slice(),
                index.len(),
                D::RANK
            )
            .into());
        }
        let values = convert_list::<I>(index, "index")?;
        let index = D::array_from_fn(|dim| values[dim]);
        let offset = mapping.try_offset(index).ok_or_else(|| {
            format!(
                "index {:?} is out of bounds for extents {:?}",
                values,
                extents.shape().as_ref()
            )
        })?;
        println!("offset {:?} = {}", values, offset);
    }

    if args.sample > 0 {
        if span == I::ZERO {
            println!("domain is empty, nothing to sample");
        } else {
            let mut rng = match args.seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            for _ in 0..args.sample {
                let index = D::array_from_fn(|dim| {
                    I::cast_usize(rng.usize(0..extents.extent(dim).as_usize()))
                });
                println!("offset {:?} = {}", index.as_ref(), mapping.offset(index));
            }
        }
    }

    if args.check {
        let start = Instant::now();
        let mismatches = mapping
            .par_indices()
            .enumerate()
            .filter(|&(expected, index)| mapping.offset(index).as_usize() != expected)
            .count();
        let elapsed = start.elapsed().as_secs_f64() * 1000.0;

        if mismatches > 0 {
            return Err(format!(
                "{} indices did not map to their row-major offset",
                mismatches
            )
            .into());
        }
        println!("check passed: {} offsets in {:.2}ms", span, elapsed);
    }

    Ok(())
}

/// Dispatch to [`describe`] with the all-dynamic pattern matching the rank.
fn describe_rank<I: IndexType>(args: &Args) -> Result<(), Box<dyn Error>> {
    match args.extents.len() {
        0 => describe::<I, <Rank<0> as AllDynamic>::Dims>(args),
        1 => describe::<I, <Rank<1> as AllDynamic>::Dims>(args),
        2 => describe::<I, <Rank<2> as AllDynamic>::Dims>(args),
        3 => describe::<I, <Rank<3> as AllDynamic>::Dims>(args),
        4 => describe::<I, <Rank<4> as AllDynamic>::Dims>(args),
        5 => describe::<I, <Rank<5> as AllDynamic>::Dims>(args),
        6 => describe::<I, <Rank<6> as AllDynamic>::Dims>(args),
        7 => describe::<I, <Rank<7> as AllDynamic>::Dims>(args),
        8 => describe::<I, <Rank<8> as AllDynamic>::Dims>(args),
        rank => Err(format!("rank {} is not supported. The maximum rank is 8.", rank).into()),
    }
}

/// Tool for inspecting the row-major mapping of an index space.
///
/// ```text
/// cargo run -p mdlayout-cli -- 7 8 9 10 --index 1,2,3,4 --check
/// ```
fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;

    match args.index_type {
        IndexKind::U8 => describe_rank::<u8>(&args),
        IndexKind::U16 => describe_rank::<u16>(&args),
        IndexKind::U32 => describe_rank::<u32>(&args),
        IndexKind::U64 => describe_rank::<u64>(&args),
        IndexKind::Usize => describe_rank::<usize>(&args),
        IndexKind::I32 => describe_rank::<i32>(&args),
        IndexKind::I64 => describe_rank::<i64>(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::{convert_list, IndexKind};

    #[test]
    fn test_parse_index_kind() {
        assert_eq!("u8".parse(), Ok(IndexKind::U8));
        assert_eq!("usize".parse(), Ok(IndexKind::Usize));
        assert_eq!("i64".parse(), Ok(IndexKind::I64));
        assert!("f32".parse::<IndexKind>().is_err());
    }

    #[test]
    fn test_convert_list() {
        assert_eq!(convert_list::<u8>(&[1, 255], "extent"), Ok(vec![1u8, 255]));
        assert_eq!(
            convert_list::<u8>(&[1, 256], "extent"),
            Err("extent value 256 is not representable as u8".to_string())
        );
        assert_eq!(
            convert_list::<u32>(&[-1], "index"),
            Err("index value -1 is not representable as u32".to_string())
        );
    }
}
