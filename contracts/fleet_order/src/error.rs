use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // INITIALIZATION ERRORS (1-9)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,

    // ============================================
    // AUTHORIZATION ERRORS (10-19)
    // ============================================
    /// Caller lacks the capability for this operation
    Unauthorized = 10,
    /// Receiver is not flagged eligible by the compliance registry
    NotEligible = 11,

    // ============================================
    // INPUT ERRORS (20-29)
    // ============================================
    /// Unit id was never created
    UnitNotFound = 20,
    /// Fraction amount or unit count out of range
    InvalidAmount = 21,
    /// Receiver cannot hold fractions (e.g. this contract, or sender == receiver)
    InvalidReceiver = 22,
    /// Configuration value out of range
    InvalidConfig = 23,

    // ============================================
    // CAPACITY ERRORS (30-39)
    // ============================================
    /// Receiver would own more units than max_units_per_holder
    ExceedsHolderLimit = 30,
    /// Current container has no room for another unit
    ContainerFull = 31,
    /// Too many full units requested in one call
    ExceedsOrderLimit = 32,

    // ============================================
    // COLLABORATOR / BALANCE ERRORS (40-49)
    // ============================================
    /// Buyer cannot cover price + fee in the payment token
    InsufficientFunds = 40,
    /// Holder does not own enough fractions of the unit
    InsufficientBalance = 41,
    /// Guarded operation re-entered while an external call was in flight
    Reentrancy = 42,

    // ============================================
    // STATE MACHINE ERRORS (50-59)
    // ============================================
    /// Status code is not one of the seven single-bit values
    InvalidStatusCode = 50,
    /// Requested status is not the successor of the current one
    InvalidTransition = 51,
    /// Unit id appears more than once in a batch
    DuplicateUnit = 52,
    /// Batch exceeds MAX_BULK_STATUS_UPDATE
    BatchTooLarge = 53,
    /// Batch is empty
    EmptyBatch = 54,
    /// Distributed payments have not reached the unit's lock period
    LockPeriodNotReached = 55,
    /// Holder is not indexed as an owner of the unit
    NotHolder = 56,

    // ============================================
    // CONTAINER ERRORS (60-69)
    // ============================================
    /// Configuration is locked while the current container has units
    ContainerOpen = 60,
    /// Container has not reached its capacity
    ContainerNotFull = 61,
    /// The last fractional unit still accepts fractions
    OpenUnitNotSealed = 62,
    /// Label count differs from the container's unit count
    LabelCountMismatch = 63,
    /// Current container must be closed first
    ContainerNotClosed = 64,
    /// Current container was already closed
    ContainerClosed = 65,

    // ============================================
    // OPERATIONAL ERRORS (70-79)
    // ============================================
    /// Contract is paused
    ContractPaused = 70,
    /// Checked arithmetic overflowed
    Overflow = 71,
}
