//! Calldata builders and return-value decoders for each registry contract
//! method and event.
//!
//! Every signature here is the canonical Solidity form used to derive the
//! selector, so these constants must match the deployed contract exactly.

use crate::abi::{self, AbiError, Decoder, Token};
use crate::models::{
    Address, Land, LandId, LandPurchased, LandRegistered, User, UserRegistration, Wei,
};

pub const USER_EXISTS: &str = "userExists(address)";
pub const REGISTER_USER: &str = "registerUser(string,string,string,string)";
pub const USERS: &str = "users(address)";
pub const LAND_COUNT: &str = "landCount()";
pub const LANDS: &str = "lands(uint256)";
pub const REGISTER_LAND: &str = "registerLand(string,uint256)";
pub const LAND_EXISTS: &str = "landExists(string)";
pub const GET_LANDS_FOR_SALE: &str = "getLandsForSale()";
pub const BUY_LAND: &str = "buyLand(uint256)";
pub const LIST_LAND_FOR_SALE: &str = "listLandForSale(uint256,uint256)";
pub const CANCEL_LAND_SALE: &str = "cancelLandSale(uint256)";

pub const LAND_REGISTERED_EVENT: &str =
    "LandRegistered(uint256,address,string,address,uint256,uint256)";
pub const LAND_PURCHASED_EVENT: &str = "LandPurchased(uint256,address,address,uint256,uint256)";

pub fn user_exists(account: &Address) -> Vec<u8> {
    abi::encode_call(USER_EXISTS, &[Token::Address(*account)])
}

pub fn register_user(registration: &UserRegistration) -> Vec<u8> {
    abi::encode_call(
        REGISTER_USER,
        &[
            Token::String(registration.name.clone()),
            Token::String(registration.email.clone()),
            Token::String(registration.phone.clone()),
            Token::String(registration.aadhar.clone()),
        ],
    )
}

pub fn users(account: &Address) -> Vec<u8> {
    abi::encode_call(USERS, &[Token::Address(*account)])
}

pub fn land_count() -> Vec<u8> {
    abi::encode_call(LAND_COUNT, &[])
}

pub fn lands(id: LandId) -> Vec<u8> {
    abi::encode_call(LANDS, &[Token::Uint(u128::from(id))])
}

pub fn register_land(address_of_land: &str, area: u64) -> Vec<u8> {
    abi::encode_call(
        REGISTER_LAND,
        &[
            Token::String(address_of_land.to_string()),
            Token::Uint(u128::from(area)),
        ],
    )
}

pub fn land_exists(address_of_land: &str) -> Vec<u8> {
    abi::encode_call(LAND_EXISTS, &[Token::String(address_of_land.to_string())])
}

pub fn get_lands_for_sale() -> Vec<u8> {
    abi::encode_call(GET_LANDS_FOR_SALE, &[])
}

pub fn buy_land(id: LandId) -> Vec<u8> {
    abi::encode_call(BUY_LAND, &[Token::Uint(u128::from(id))])
}

pub fn list_land_for_sale(id: LandId, price: Wei) -> Vec<u8> {
    abi::encode_call(
        LIST_LAND_FOR_SALE,
        &[Token::Uint(u128::from(id)), Token::Uint(price)],
    )
}

pub fn cancel_land_sale(id: LandId) -> Vec<u8> {
    abi::encode_call(CANCEL_LAND_SALE, &[Token::Uint(u128::from(id))])
}

pub fn decode_bool(data: &[u8]) -> Result<bool, AbiError> {
    Decoder::new(data).bool(0)
}

pub fn decode_u64(data: &[u8]) -> Result<u64, AbiError> {
    Decoder::new(data).uint64(0)
}

pub fn decode_land_ids(data: &[u8]) -> Result<Vec<LandId>, AbiError> {
    Decoder::new(data)
        .uint_array(0)?
        .into_iter()
        .map(|id| u64::try_from(id).map_err(|_| AbiError::Overflow(64)))
        .collect()
}

fn user_at(decoder: &Decoder<'_>) -> Result<User, AbiError> {
    Ok(User {
        user_address: decoder.address(0)?,
        name: decoder.string(1)?,
        email: decoder.string(2)?,
        phone: decoder.string(3)?,
        aadhar: decoder.string(4)?,
        is_registered: decoder.bool(5)?,
    })
}

/// `users(address)` returns the six fields as separate values.
pub fn decode_user(data: &[u8]) -> Result<User, AbiError> {
    user_at(&Decoder::new(data))
}

/// `lands(uint256)` returns a single tuple with two nested user tuples.
pub fn decode_land(data: &[u8]) -> Result<Land, AbiError> {
    let land = Decoder::new(data).tuple(0)?;
    Ok(Land {
        owner: user_at(&land.tuple(0)?)?,
        address_of_land: land.string(1)?,
        registered_by: user_at(&land.tuple(2)?)?,
        registry_date_and_time: land.uint64(3)?,
        area: land.uint64(4)?,
        land_id: land.uint64(5)?,
        is_for_sale: land.bool(6)?,
        price: land.uint(7)?,
    })
}

/// The land id is the first indexed topic; everything else is in `data`.
pub fn decode_land_registered(
    land_id_topic: &[u8],
    data: &[u8],
) -> Result<LandRegistered, AbiError> {
    let fields = Decoder::new(data);
    Ok(LandRegistered {
        land_id: Decoder::new(land_id_topic).uint64(0)?,
        owner: fields.address(0)?,
        address_of_land: fields.string(1)?,
        registered_by: fields.address(2)?,
        registry_date_and_time: fields.uint64(3)?,
        area: fields.uint64(4)?,
    })
}

pub fn decode_land_purchased(
    land_id_topic: &[u8],
    data: &[u8],
) -> Result<LandPurchased, AbiError> {
    let fields = Decoder::new(data);
    Ok(LandPurchased {
        land_id: Decoder::new(land_id_topic).uint64(0)?,
        old_owner: fields.address(0)?,
        new_owner: fields.address(1)?,
        price: fields.uint(2)?,
        timestamp: fields.uint64(3)?,
    })
}

pub fn user_token(user: &User) -> Token {
    Token::Tuple(vec![
        Token::Address(user.user_address),
        Token::String(user.name.clone()),
        Token::String(user.email.clone()),
        Token::String(user.phone.clone()),
        Token::String(user.aadhar.clone()),
        Token::Bool(user.is_registered),
    ])
}

pub fn land_token(land: &Land) -> Token {
    Token::Tuple(vec![
        user_token(&land.owner),
        Token::String(land.address_of_land.clone()),
        user_token(&land.registered_by),
        Token::Uint(u128::from(land.registry_date_and_time)),
        Token::Uint(u128::from(land.area)),
        Token::Uint(u128::from(land.land_id)),
        Token::Bool(land.is_for_sale),
        Token::Uint(land.price),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{encode, uint_word};

    fn user(byte: u8, name: &str) -> User {
        User {
            user_address: Address([byte; 20]),
            name: name.to_string(),
            email: format!("{name}@example.com"),
            phone: "9876543210".to_string(),
            aadhar: "1234-5678-9012".to_string(),
            is_registered: true,
        }
    }

    #[test]
    fn calldata_starts_with_selector() {
        let data = land_count();
        assert_eq!(data, abi::selector(LAND_COUNT).to_vec());

        let data = buy_land(7);
        assert_eq!(&data[..4], &abi::selector(BUY_LAND));
        assert_eq!(data.len(), 4 + 32);
        assert_eq!(data[35], 7);
    }

    #[test]
    fn decodes_land_tuple_with_nested_users() {
        let land = Land {
            owner: user(1, "Ravi"),
            address_of_land: "12 MG Road, Pune".to_string(),
            registered_by: user(2, "Meera"),
            registry_date_and_time: 1_700_000_000,
            area: 450,
            land_id: 3,
            is_for_sale: true,
            price: 2_500_000_000_000_000_000,
        };
        let data = encode(&[land_token(&land)]);
        assert_eq!(decode_land(&data).unwrap(), land);
    }

    #[test]
    fn decodes_user_fields() {
        let ravi = user(9, "Ravi");
        let Token::Tuple(fields) = user_token(&ravi) else {
            unreachable!()
        };
        let data = encode(&fields);
        assert_eq!(decode_user(&data).unwrap(), ravi);
    }

    #[test]
    fn decodes_land_registered_event() {
        let data = encode(&[
            Token::Address(Address([1; 20])),
            Token::String("Plot 4".into()),
            Token::Address(Address([2; 20])),
            Token::Uint(100),
            Token::Uint(60),
        ]);
        let event = decode_land_registered(&uint_word(4), &data).unwrap();
        assert_eq!(event.land_id, 4);
        assert_eq!(event.address_of_land, "Plot 4");
        assert_eq!(event.registered_by, Address([2; 20]));
        assert_eq!(event.area, 60);
    }

    #[test]
    fn decodes_land_purchased_event() {
        let data = encode(&[
            Token::Address(Address([1; 20])),
            Token::Address(Address([2; 20])),
            Token::Uint(10),
            Token::Uint(200),
        ]);
        let event = decode_land_purchased(&uint_word(4), &data).unwrap();
        assert_eq!(event.old_owner, Address([1; 20]));
        assert_eq!(event.new_owner, Address([2; 20]));
        assert_eq!(event.price, 10);
        assert_eq!(event.timestamp, 200);
    }

    #[test]
    fn empty_call_result_is_an_error() {
        assert!(decode_bool(&[]).is_err());
        assert!(decode_land(&[]).is_err());
    }
}
