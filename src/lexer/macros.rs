macro_rules! tok_ret {
    ($value:expr; advance $stream:ident; $amount:expr) => ({
        $stream.advance($amount);
        return Ok(Some($value))
    });
}
