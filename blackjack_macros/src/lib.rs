use proc_macro::TokenStream as TokenStream1;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{parse_macro_input, Ident, ImplItemFn};

/// This macro is added before a method of `Round` struct in the impl block.
/// Use this macro to first check if current game phase is exactly the phase in
/// the attribute.
///
/// For example, `#[allowed_phase(PlayerTurn)]` will make a method first check
/// if `self.current_game_phase` is `GamePhase::PlayerTurn`. If not, the method
/// returns `Err(crate::Error::PhaseNotAllowed { .. })` before running its body.
///
/// The annotated method must return `Result<_, crate::Error>`, and `GamePhase`
/// must be in scope where the method is defined.
#[proc_macro_attribute]
pub fn allowed_phase(attr: TokenStream1, item: TokenStream1) -> TokenStream1 {
    let phase = parse_macro_input!(attr as Ident);
    let mut ast = parse_macro_input!(item as ImplItemFn);
    let method = ast.sig.ident.to_string();

    let guard = guard_statement(&phase, &method);
    let guard: syn::Stmt = match syn::parse2(guard) {
        Ok(stmt) => stmt,
        Err(err) => return err.to_compile_error().into(),
    };
    ast.block.stmts.insert(0, guard);
    ast.into_token_stream().into()
}

fn guard_statement(phase: &Ident, method: &str) -> TokenStream2 {
    quote! {
        if self.current_game_phase != GamePhase::#phase {
            return Err(crate::Error::PhaseNotAllowed {
                method: #method,
                allowed: GamePhase::#phase,
                actual: self.current_game_phase,
            });
        }
    }
}
