//! # lexnet
//!
//! An in-memory lexical-semantic network engine: WordNet-style index and
//! data files parsed into an immutable graph with taxonomy traversal and
//! word-sense similarity metrics on top.
//!
//! ## Architecture
//!
//! - **Record parser** (`reader`): whitespace-token index/data records,
//!   IC tables, OMW tab files, exception lists
//! - **Graph store** (`store`): dual-indexed synset arena (lemma index +
//!   identity map) with the adjective/satellite alias rule
//! - **Path engine** (`path`): memoized hypernym paths, depths, closures,
//!   and the virtual-root sentinel for forest taxonomies
//! - **Similarity engine** (`similarity`): path, Leacock-Chodorow,
//!   Wu-Palmer, Resnik, Jiang-Conrath, and Lin metrics
//! - **Facade** (`wordnet`): sense-name/sense-key resolution, morphology,
//!   multilingual lemma maps
//!
//! ## Library usage
//!
//! ```no_run
//! use lexnet::wordnet::{WordNet, WordNetConfig};
//!
//! let wn = WordNet::load(WordNetConfig::new("/usr/share/wordnet")).unwrap();
//! let dog = wn.synset("dog.n.01").unwrap();
//! let cat = wn.synset("cat.n.01").unwrap();
//! let sim = wn.path_similarity(dog, cat, true, None).unwrap();
//! println!("{sim:?}");
//! ```

pub mod error;
pub mod ic;
pub mod ident;
pub mod morphy;
pub mod omw;
pub mod path;
pub mod pos;
pub mod reader;
pub mod relation;
pub mod similarity;
pub mod store;
pub mod synset;
pub mod wordnet;

pub use error::{LexnetError, LexnetResult};
pub use pos::PartOfSpeech;
pub use relation::Relation;
pub use synset::{Lemma, Synset, SynsetId};
pub use wordnet::{WordNet, WordNetConfig};
