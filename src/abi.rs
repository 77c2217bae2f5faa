use alloy_sol_types::sol;

sol! {
    /// The slice of the ERC-20 surface the workflow touches.
    interface IErc20 {
        event Transfer(address indexed from, address indexed to, uint256 value);

        function transfer(address to, uint256 amount) external returns (bool);
        function balanceOf(address owner) external view returns (uint256);
    }

    /// Receipt-token views exposed by the lending market. `balanceOfUnderlying`
    /// is state-changing on chain (it accrues interest) but is only ever issued
    /// here as a read-only call.
    interface IReceiptToken {
        function balanceOf(address owner) external view returns (uint256);
        function balanceOfUnderlying(address owner) external returns (uint256);
    }

    /// The deployed gateway contract that custodies the underlying token and
    /// moves it in and out of the lending market on the caller's behalf.
    interface IGateway {
        /// Emitted once per gateway action; `code` carries the market's own
        /// status code, zero on success.
        event Status(string message, uint256 code);

        function supplyErc20(address underlying, address receiptToken, uint256 amount) external returns (uint256);
        function redeemErc20(uint256 amount, bool byReceiptAmount, address receiptToken) external returns (bool);
    }
}
