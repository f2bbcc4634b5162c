//! Token protocol payloads carried in data outputs.
//!
//! A payload is the ASCII string `protocol:<op>:<TICKER>[:<amount>]`. Transfers
//! push the recipient's hash160 after the payload; mints push the payload
//! alone.

use std::fmt;
use std::str::FromStr;

use krc_script::Script;

use crate::TransactionError;

/// Protocol label leading every payload.
pub const PROTOCOL: &str = "protocol";

pub const MAX_TICKER_LEN: usize = 16;

/// A token ticker: 1 to 16 ASCII letters or digits, stored upper-cased.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Ticker(String);

impl Ticker {
    pub fn new(raw: &str) -> Result<Self, TransactionError> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_TICKER_LEN
            && raw.bytes().all(|b| b.is_ascii_alphanumeric());
        if !valid {
            return Err(TransactionError::InvalidTicker(raw.to_string()));
        }
        Ok(Ticker(raw.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Ticker {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ticker::new(s)
    }
}

/// A token instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenOp {
    Transfer {
        ticker: Ticker,
        amount: u64,
        /// hash160 of the recipient address.
        recipient: [u8; 20],
    },
    Mint {
        ticker: Ticker,
    },
}

impl TokenOp {
    /// Create a transfer instruction.
    ///
    /// # Returns
    /// `InvalidAmount` when `amount` is zero.
    pub fn transfer(ticker: Ticker, amount: u64, recipient: [u8; 20]) -> Result<Self, TransactionError> {
        if amount == 0 {
            return Err(TransactionError::InvalidAmount(
                "transfer amount must be positive".to_string(),
            ));
        }
        Ok(TokenOp::Transfer {
            ticker,
            amount,
            recipient,
        })
    }

    pub fn mint(ticker: Ticker) -> Self {
        TokenOp::Mint { ticker }
    }

    pub fn to_payload(&self) -> String {
        match self {
            TokenOp::Transfer { ticker, amount, .. } => {
                format!("{}:transfer:{}:{}", PROTOCOL, ticker, amount)
            }
            TokenOp::Mint { ticker } => format!("{}:mint:{}", PROTOCOL, ticker),
        }
    }

    /// The `OP_RETURN` script placed in the zero-value data output.
    pub fn data_script(&self) -> Result<Script, TransactionError> {
        let payload = self.to_payload();
        let script = match self {
            TokenOp::Transfer { recipient, .. } => {
                Script::data(&[payload.as_bytes(), &recipient[..]])?
            }
            TokenOp::Mint { .. } => Script::data(&[payload.as_bytes()])?,
        };
        Ok(script)
    }

    /// Recover the instruction from a data output script.
    ///
    /// # Returns
    /// `InvalidTransaction` if the script does not hold a well-formed
    /// payload, `InvalidTicker`/`InvalidAmount` for bad fields.
    pub fn from_data_script(script: &Script) -> Result<Self, TransactionError> {
        let pushes = script.data_pushes()?;
        let malformed = |why: &str| TransactionError::InvalidTransaction(format!("token payload: {}", why));

        let payload = pushes
            .first()
            .ok_or_else(|| malformed("missing payload push"))?;
        let payload = std::str::from_utf8(payload).map_err(|_| malformed("not UTF-8"))?;
        let fields: Vec<&str> = payload.split(':').collect();

        match fields.as_slice() {
            [PROTOCOL, "transfer", ticker, amount] => {
                let amount = amount
                    .parse::<u64>()
                    .map_err(|_| TransactionError::InvalidAmount(amount.to_string()))?;
                let recipient: [u8; 20] = pushes
                    .get(1)
                    .and_then(|r| r.as_slice().try_into().ok())
                    .ok_or_else(|| malformed("transfer without 20-byte recipient"))?;
                TokenOp::transfer(Ticker::new(ticker)?, amount, recipient)
            }
            [PROTOCOL, "mint", ticker] if pushes.len() == 1 => Ok(TokenOp::mint(Ticker::new(ticker)?)),
            _ => Err(malformed(payload)),
        }
    }
}
