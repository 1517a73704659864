//! Manual ABI encoding/decoding for the Uniswap-V2-style contract surface
//!
//! Factory `getPair`, pair `getReserves`, ERC-20 `decimals` and router
//! `getAmountsOut` are the only calls the bot ever issues; all are
//! `view` functions.

use alloy::{
    primitives::{keccak256, Address, U256},
    sol_types::{sol_data, SolType, SolValue},
};
use anyhow::{Context, Result};

fn selector(signature: &str) -> Vec<u8> {
    keccak256(signature)[..4].to_vec()
}

pub fn encode_get_pair(token_a: Address, token_b: Address) -> Vec<u8> {
    let mut encoded = selector("getPair(address,address)");
    encoded.extend_from_slice(&[0u8; 12]);
    encoded.extend_from_slice(token_a.as_slice());
    encoded.extend_from_slice(&[0u8; 12]);
    encoded.extend_from_slice(token_b.as_slice());
    encoded
}

pub fn encode_get_reserves() -> Vec<u8> {
    selector("getReserves()")
}

pub fn encode_decimals() -> Vec<u8> {
    selector("decimals()")
}

pub fn encode_get_amounts_out(amount_in: U256, path: &[Address]) -> Vec<u8> {
    let mut encoded = selector("getAmountsOut(uint256,address[])");

    encoded.extend_from_slice(&amount_in.to_be_bytes::<32>());
    // Offset of the dynamic path array: two head words
    encoded.extend_from_slice(&U256::from(64).to_be_bytes::<32>());
    encoded.extend_from_slice(&U256::from(path.len()).to_be_bytes::<32>());
    for addr in path {
        encoded.extend_from_slice(&[0u8; 12]);
        encoded.extend_from_slice(addr.as_slice());
    }

    encoded
}

pub fn decode_pair_address(data: &[u8]) -> Result<Address> {
    Address::abi_decode(data, true).context("failed to decode pair address")
}

pub fn decode_reserves(data: &[u8]) -> Result<(U256, U256)> {
    let decoded = <(U256, U256, U256)>::abi_decode(data, true)
        .context("failed to decode reserves")?;
    Ok((decoded.0, decoded.1))
}

pub fn decode_decimals(data: &[u8]) -> Result<u8> {
    sol_data::Uint::<8>::abi_decode(data, true).context("failed to decode decimals")
}

pub fn decode_amounts(data: &[u8]) -> Result<Vec<U256>> {
    Vec::<U256>::abi_decode(data, true).context("failed to decode amounts")
}
