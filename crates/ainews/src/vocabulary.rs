//! Closed vocabularies mapping human terms to taxonomy identifiers
//!
//! Each table is a static slice of `(term, id)` entries, loaded once into a
//! lookup map on first use. Several terms may alias the same id.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a category, network or token in the news service taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxonomyId(pub u32);

impl fmt::Display for TaxonomyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Filter dimension a term belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Topic categories (`categoryId`)
    Category,
    /// Blockchains and networks (`subCategoryId`)
    Network,
    /// Tokens and coins (`tokenId`)
    Token,
}

impl Dimension {
    /// All dimensions in request order
    pub const ALL: [Dimension; 3] = [Dimension::Category, Dimension::Network, Dimension::Token];

    /// Vocabulary used to resolve terms of this dimension
    pub fn table(self) -> &'static VocabularyTable {
        match self {
            Dimension::Category => &CATEGORIES,
            Dimension::Network => &NETWORKS,
            Dimension::Token => &TOKENS,
        }
    }

    /// Request field carrying the raw terms
    pub fn request_field(self) -> &'static str {
        match self {
            Dimension::Category => "categories",
            Dimension::Network => "blockchains",
            Dimension::Token => "tokens",
        }
    }

    /// Remote query field carrying the resolved ids
    pub fn query_field(self) -> &'static str {
        match self {
            Dimension::Category => "categoryId",
            Dimension::Network => "subCategoryId",
            Dimension::Token => "tokenId",
        }
    }

    /// Singular noun used in messages
    pub fn noun(self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Network => "blockchain",
            Dimension::Token => "token",
        }
    }
}

/// Immutable mapping from normalized term to taxonomy id
#[derive(Debug)]
pub struct VocabularyTable {
    name: &'static str,
    entries: HashMap<&'static str, TaxonomyId>,
}

impl VocabularyTable {
    /// Build a table from static entries
    ///
    /// Keys are expected to be lowercase and trimmed already.
    pub fn from_entries(name: &'static str, entries: &'static [(&'static str, u32)]) -> Self {
        Self {
            name,
            entries: entries
                .iter()
                .map(|&(term, id)| (term, TaxonomyId(id)))
                .collect(),
        }
    }

    /// Table name, e.g. `"categories"`
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Look up a raw term, normalizing case and surrounding whitespace
    pub fn lookup(&self, term: &str) -> Option<TaxonomyId> {
        let normalized = normalize(term);
        self.entries.get(normalized.as_str()).copied()
    }

    /// Number of distinct terms (aliases included)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no terms
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(term, id)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, TaxonomyId)> + '_ {
        self.entries.iter().map(|(term, id)| (*term, *id))
    }
}

/// Normalize a caller-supplied term for lookup
pub fn normalize(term: &str) -> String {
    term.trim().to_lowercase()
}

const CATEGORY_ENTRIES: &[(&str, u32)] = &[
    ("blockchain gaming", 2),
    ("gaming", 2),
    ("dao", 3),
    ("dapps", 4),
    ("defi", 5),
    ("lending", 6),
    ("metaverse", 7),
    ("nft", 8),
    ("nfts", 8),
    ("stablecoins", 9),
    ("stablecoin", 9),
    ("cryptocurrency", 64),
    ("crypto", 64),
    ("decentralized", 65),
    ("smart contracts", 66),
    ("smart contract", 66),
    ("distributed ledger", 67),
    ("cryptography", 68),
    ("digital assets", 69),
    ("tokenization", 70),
    ("consensus mechanisms", 71),
    ("consensus", 71),
    ("ico", 72),
    ("initial coin offering", 72),
    ("crypto wallets", 73),
    ("wallets", 73),
    ("web3", 74),
    ("web3.0", 74),
    ("interoperability", 75),
    ("mining", 76),
    ("cross-chain", 77),
    ("cross-chain transactions", 77),
    ("exchange", 78),
    ("exchanges", 78),
];

const NETWORK_ENTRIES: &[(&str, u32)] = &[
    ("bitcoin", 11),
    ("btc", 11),
    ("bnb chain", 12),
    ("bnb", 12),
    ("celo", 13),
    ("cosmos", 14),
    ("ethereum", 15),
    ("eth", 15),
    ("fantom", 16),
    ("ftm", 16),
    ("flow", 17),
    ("litecoin", 18),
    ("ltc", 18),
    ("monero", 19),
    ("xmr", 19),
    ("polygon", 20),
    ("matic", 20),
    ("xrp ledger", 21),
    ("xrp", 21),
    ("solana", 22),
    ("sol", 22),
    ("tron", 23),
    ("trx", 23),
    ("terra", 24),
    ("tezos", 25),
    ("xtz", 25),
    ("wax", 26),
    ("algorand", 27),
    ("algo", 27),
    ("arbitrum", 28),
    ("astar", 29),
    ("aurora", 30),
    ("avalanche", 31),
    ("avax", 31),
    ("base", 32),
    ("binance smart chain", 33),
    ("bsc", 33),
    ("cardano", 34),
    ("ada", 34),
    ("cronos", 36),
    ("moonbeam", 37),
    ("harmony", 41),
    ("oasis", 42),
    ("oasis sapphire", 43),
    ("ontology", 44),
    ("optimism", 45),
    ("op", 45),
    ("other", 46),
    ("platon", 47),
    ("rangers", 49),
    ("ronin", 50),
    ("shiden", 51),
    ("skale", 52),
    ("stacks", 54),
    ("stargaze", 55),
    ("steem", 56),
    ("sx network", 57),
    ("telos", 58),
    ("telos evm", 59),
    ("theta", 61),
    ("thundercore", 62),
];

const TOKEN_ENTRIES: &[(&str, u32)] = &[
    ("bitcoin", 79),
    ("btc", 79),
    ("ethereum", 80),
    ("eth", 80),
    ("tether", 81),
    ("usdt", 81),
    ("bnb", 82),
    ("xrp", 83),
    ("usd coin", 84),
    ("usdc", 84),
    ("solana", 85),
    ("sol", 85),
    ("cardano", 86),
    ("ada", 86),
    ("dogecoin", 87),
    ("doge", 87),
    ("tron", 88),
    ("trx", 88),
    ("toncoin", 89),
    ("ton", 89),
    ("dai", 90),
    ("polygon", 91),
    ("matic", 91),
    ("polkadot", 92),
    ("dot", 92),
    ("litecoin", 93),
    ("ltc", 93),
    ("wrapped bitcoin", 94),
    ("wbtc", 94),
    ("bitcoin cash", 95),
    ("bch", 95),
    ("chainlink", 96),
    ("link", 96),
    ("shiba inu", 97),
    ("shib", 97),
    ("unus sed leo", 98),
    ("leo", 98),
    ("trueusd", 99),
    ("tusd", 99),
    ("avalanche", 100),
    ("avax", 100),
    ("stellar", 101),
    ("xlm", 101),
    ("monero", 102),
    ("xmr", 102),
    ("okb", 103),
    ("cosmos", 104),
    ("atom", 104),
    ("uniswap", 105),
    ("uni", 105),
    ("ethereum classic", 106),
    ("etc", 106),
    ("busd", 107),
    ("hedera", 108),
    ("hbar", 108),
];

/// Topic categories
pub static CATEGORIES: Lazy<VocabularyTable> =
    Lazy::new(|| VocabularyTable::from_entries("categories", CATEGORY_ENTRIES));

/// Blockchains and networks, sent to the service as sub-categories
pub static NETWORKS: Lazy<VocabularyTable> =
    Lazy::new(|| VocabularyTable::from_entries("blockchains", NETWORK_ENTRIES));

/// Tokens and coins
pub static TOKENS: Lazy<VocabularyTable> =
    Lazy::new(|| VocabularyTable::from_entries("tokens", TOKEN_ENTRIES));
