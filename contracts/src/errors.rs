//! Protocol error definitions.

use odra::prelude::*;

/// SimVault protocol errors
#[repr(u16)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum VaultError {
    // Input validation errors (1xx)
    InvalidToken = 100,
    InvalidCollateralAmount = 101,
    InvalidGovAmount = 102,
    InvalidStableAmount = 103,
    ZeroAmount = 104,
    MintAmountTooSmall = 105,
    RedeemAmountTooSmall = 106,

    // Price errors (2xx)
    ZeroReserves = 200,
    DivisionByZero = 201,
    MathOverflow = 202,

    // Economic precondition errors (3xx)
    NoStableInCirculation = 300,
    BuybackNotAllowed = 301,
    InvalidBuybackAmount = 302,
    ReCollateralizationNotRequired = 303,
    CollateralExceedsShortfall = 304,
    CollateralRatioOutOfBounds = 305,

    // Access control errors (4xx)
    Unauthorized = 400,
    OnlyVault = 401,
    VaultAlreadySet = 402,

    // Token errors (5xx)
    InsufficientBalance = 500,
    InsufficientAllowance = 501,
    CollateralTransferFailed = 502,

    // Configuration errors (9xx)
    InvalidConfig = 900,
    InvalidPool = 901,
    ReentrantCall = 902,
}

impl VaultError {
    pub const fn message(&self) -> &'static str {
        match self {
            // Input validation
            VaultError::InvalidToken => "Token not in pair",
            VaultError::InvalidCollateralAmount => "Invalid collateral amount",
            VaultError::InvalidGovAmount => "Invalid gov amount",
            VaultError::InvalidStableAmount => "Invalid stable amount",
            VaultError::ZeroAmount => "Amount must be greater than zero",
            VaultError::MintAmountTooSmall => "Deposit too small to mint stable",
            VaultError::RedeemAmountTooSmall => "Redemption too small to pay out",

            // Price
            VaultError::ZeroReserves => "Pool reserves are zero",
            VaultError::DivisionByZero => "Division by zero",
            VaultError::MathOverflow => "Arithmetic overflow",

            // Economic preconditions
            VaultError::NoStableInCirculation => "No stable in circulation",
            VaultError::BuybackNotAllowed => "Buyback not allowed",
            VaultError::InvalidBuybackAmount => "Invalid buyback amount",
            VaultError::ReCollateralizationNotRequired => "Re-collateralization not required",
            VaultError::CollateralExceedsShortfall => "Collateral exceeds shortfall",
            VaultError::CollateralRatioOutOfBounds => "Collateral ratio out of bounds",

            // Access control
            VaultError::Unauthorized => "Unauthorized: caller is not owner",
            VaultError::OnlyVault => "Only the vault can mint or burn",
            VaultError::VaultAlreadySet => "Vault already set",

            // Token
            VaultError::InsufficientBalance => "Insufficient token balance",
            VaultError::InsufficientAllowance => "Insufficient allowance",
            VaultError::CollateralTransferFailed => "Collateral transfer failed",

            // Config
            VaultError::InvalidConfig => "Invalid configuration parameter",
            VaultError::InvalidPool => "Pool does not hold the expected tokens",
            VaultError::ReentrantCall => "Reentrant call",
        }
    }
}

impl core::fmt::Display for VaultError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

impl From<VaultError> for OdraError {
    fn from(error: VaultError) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            OdraError::user(error as u16)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            OdraError::user(error as u16, error.message())
        }
    }
}
