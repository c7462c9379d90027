mod doubles;
