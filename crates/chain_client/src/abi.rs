//! Contract bindings for the mintable test tokens and the swap-sell
//! deployment. The contracts themselves are external collaborators; only the
//! entry points this client invokes are declared here.

use alloy::sol;

sol! {
    /// Mintable test token, the slice of the ERC20 surface this client uses.
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract TestToken {
        function mint(address to, uint256 amount) public;
        function approve(address spender, uint256 amount) public returns (bool);
        function balanceOf(address account) public view returns (uint256);
    }
}

sol! {
    /// Pre-deployed swap-selling contract: one sell entry point per pair leg
    /// plus a parameterless finalization call.
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract SwapSell {
        function sell_token0(uint256 amountIn) external;
        function sell_token1(uint256 amountIn) external;
        function execute() external;
    }
}
