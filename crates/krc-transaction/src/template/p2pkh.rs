//! Pay-to-public-key-hash template.
//!
//! Locking scripts are `OP_DUP OP_HASH160 <hash160> OP_EQUALVERIFY
//! OP_CHECKSIG`; unlocking scripts are `<DER sig || sighash byte>
//! <compressed pubkey>`.

use krc_primitives::ec::PrivateKey;
use krc_script::{Address, Script};

use crate::sighash::SIGHASH_ALL;
use crate::template::UnlockingScriptTemplate;
use crate::transaction::Transaction;
use crate::TransactionError;

/// Locking script paying to `address`.
pub fn lock(address: &Address) -> Script {
    address.locking_script()
}

/// Create a P2PKH unlocker signing with `SIGHASH_ALL`.
pub fn unlock(private_key: &PrivateKey) -> P2PKH<'_> {
    P2PKH {
        private_key,
        pub_key_hash: private_key.pub_key().hash160(),
        sighash_flag: SIGHASH_ALL,
    }
}

pub struct P2PKH<'a> {
    private_key: &'a PrivateKey,
    pub_key_hash: [u8; 20],
    sighash_flag: u32,
}

impl UnlockingScriptTemplate for P2PKH<'_> {
    /// Sign input `input_index`.
    ///
    /// # Returns
    /// `SigningError` if the input has no source output, the source output
    /// is not P2PKH, or its public key hash does not belong to this key.
    fn sign(&self, tx: &Transaction, input_index: usize) -> Result<Script, TransactionError> {
        let input = tx.inputs.get(input_index).ok_or_else(|| {
            TransactionError::SigningError(format!(
                "input index {} out of range (tx has {} inputs)",
                input_index,
                tx.inputs.len()
            ))
        })?;
        let source = input.source_output().ok_or_else(|| {
            TransactionError::SigningError(format!(
                "missing source output for {}",
                input.previous_outpoint
            ))
        })?;

        let owner = source.locking_script.public_key_hash().map_err(|_| {
            TransactionError::SigningError(format!(
                "output spent by {} is not pay-to-public-key-hash",
                input.previous_outpoint
            ))
        })?;
        if owner != self.pub_key_hash {
            return Err(TransactionError::SigningError(format!(
                "signing key does not own output {}",
                input.previous_outpoint
            )));
        }

        let sig_hash = tx.calc_input_signature_hash(input_index, self.sighash_flag)?;
        let signature = self
            .private_key
            .sign(&sig_hash)
            .map_err(|e| TransactionError::SigningError(e.to_string()))?;

        let mut sig_buf = signature.to_der();
        sig_buf.push(self.sighash_flag as u8);

        let mut script = Script::new();
        script.append_push_data(&sig_buf)?;
        script.append_push_data(&self.private_key.pub_key().to_compressed())?;
        Ok(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use krc_primitives::chainhash::Hash;
    use krc_primitives::ec::{PublicKey, Signature};
    use krc_script::Network;

    use crate::input::{Outpoint, TransactionInput};
    use crate::output::TransactionOutput;

    fn key() -> PrivateKey {
        PrivateKey::from_hex("0000000000000000000000000000000000000000000000000000000000000001")
            .unwrap()
    }

    fn spending_tx(owner: &Address) -> Transaction {
        let mut tx = Transaction::new();
        tx.add_input(TransactionInput::spending(
            Outpoint {
                transaction_id: Hash::new([7u8; 32]),
                index: 0,
            },
            TransactionOutput::new(5_000, lock(owner)),
        ));
        tx.add_output(TransactionOutput::new(3_000, lock(owner)));
        tx
    }

    #[test]
    fn unlocking_script_carries_signature_and_pubkey() {
        let key = key();
        let addr = Address::from_public_key(&key.pub_key(), Network::Mainnet);
        let tx = spending_tx(&addr);

        let script = unlock(&key).sign(&tx, 0).unwrap();
        let pushes: Vec<Vec<u8>> = script
            .chunks()
            .unwrap()
            .into_iter()
            .filter_map(|c| c.data)
            .collect();
        assert_eq!(pushes.len(), 2);
        // 1 + 72 (DER sig + sighash byte) + 1 + 33 (compressed pubkey).
        assert!(script.len() <= 107);

        let (sighash_byte, der) = pushes[0].split_last().unwrap();
        assert_eq!(*sighash_byte, SIGHASH_ALL as u8);
        let sig = Signature::from_der(der).unwrap();
        assert!(sig.is_low_s());

        let pub_key = PublicKey::from_bytes(&pushes[1]).unwrap();
        assert_eq!(pub_key, key.pub_key());
        let digest = tx.calc_input_signature_hash(0, SIGHASH_ALL).unwrap();
        assert!(pub_key.verify(&digest, &sig));
    }

    #[test]
    fn rejects_output_owned_by_another_key() {
        let key = key();
        let other = Address::from_public_key_hash(&[9u8; 20], Network::Mainnet);
        let tx = spending_tx(&other);
        assert!(matches!(
            unlock(&key).sign(&tx, 0),
            Err(TransactionError::SigningError(_))
        ));
    }

    #[test]
    fn rejects_missing_source_output() {
        let key = key();
        let mut tx = Transaction::new();
        tx.add_input(TransactionInput::new(Outpoint {
            transaction_id: Hash::new([1u8; 32]),
            index: 3,
        }));
        assert!(matches!(
            unlock(&key).sign(&tx, 0),
            Err(TransactionError::SigningError(_))
        ));
        assert!(unlock(&key).sign(&tx, 1).is_err());
    }
}
