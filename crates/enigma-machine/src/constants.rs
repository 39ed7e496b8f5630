// Built-in rotor set: the Naval M4 machine (rotors I-VIII, the thin
// rotors Beta and Gamma, and thin reflectors B and C).

/// Configuration text for the standard five-slot, three-pawl M4 machine.
pub const DEFAULT_CONFIG: &str = "\
ABCDEFGHIJKLMNOPQRSTUVWXYZ
5 3
I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
II ME     (FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)
III MV    (ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)
IV MJ     (AEPLIYWCOXMRFZBSTGJQNH) (DV) (KU)
V MZ      (AVOLDRWFIUQ)(BZKSMNHYC) (EGTJPX)
VI MZM    (AJQDVLEOZWIYTS) (CGMNHFUX) (BPRK)
VII MZM   (ANOUPFRIMBZTLWKSVEGCJYDHXQ)
VIII MZM  (AFLSETWUNDHOZVICQ) (BKJ) (GXY) (MPR)
Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
Gamma N   (AFNIRLBSQWVXGUZDKMTPCOYJHE)
B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
          (RX) (SZ) (TV)
C R       (AR) (BD) (CO) (EJ) (FN) (GT) (HK) (IV) (LM) (PW)
          (QZ) (SX) (UY)
";

/// Width of the letter groups in printed messages.
pub const GROUP_SIZE: usize = 5;
